//! File analysis endpoints, mounted under `/api/fileanalysis`

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::info;

use crate::models::{
    AnalysisData, AnalyzeFileData, AnalyzeFileParams, AnalyzeFilesRequest, ApiResponse, AppState,
    DataEnvelope, FileRecord, SearchAnalyzeData, SearchAnalyzeParams, SearchRequest,
};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/fileanalysis/search", post(search_files))
        .route("/api/fileanalysis/search-analyze", post(search_and_analyze))
        .route("/api/fileanalysis/analyze", post(analyze_file))
        .route("/api/fileanalysis/analyze-files", post(analyze_files))
        .with_state(state)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {}", e.body_text())))
}

async fn search_files(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Vec<FileRecord>>>> {
    let request = body(payload)?;
    info!(term = ?request.search_term, folder = ?request.folder_path, "File search request received");

    let files = state
        .analyzer
        .search(request.search_term.as_deref(), request.folder_path.as_deref())
        .await?;

    let message = if files.is_empty() { "No files found" } else { "Files found" };
    Ok(Json(ApiResponse::success(message, files)))
}

async fn search_and_analyze(
    State(state): State<AppState>,
    payload: Result<Json<DataEnvelope<SearchAnalyzeParams>>, JsonRejection>,
) -> AppResult<Json<ApiResponse<SearchAnalyzeData>>> {
    let params = body(payload)?.into_first().unwrap_or_default();
    info!(term = ?params.search_term, "Search-and-analyze request received");

    Ok(Json(state.analyzer.search_and_analyze(params).await?))
}

async fn analyze_file(
    State(state): State<AppState>,
    payload: Result<Json<DataEnvelope<AnalyzeFileParams>>, JsonRejection>,
) -> AppResult<Json<ApiResponse<AnalyzeFileData>>> {
    let params = body(payload)?.into_first().unwrap_or_default();
    info!(filepath = ?params.filepath, "Single file analysis request received");

    Ok(Json(state.analyzer.analyze_file(params).await?))
}

async fn analyze_files(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeFilesRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<AnalysisData>>> {
    let request = body(payload)?;
    info!(
        files = request.files.as_ref().map_or(0, Vec::len),
        "Multi-file analysis request received"
    );

    Ok(Json(state.analyzer.analyze_files(request).await?))
}
