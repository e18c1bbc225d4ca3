use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisMode, FileAnalyzer};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub analyzer: FileAnalyzer,
}

/// A file found by the locator. Content is not read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub filename: String,
    pub filepath: String,
    pub extension: String,
    pub size: u64,
    pub size_formatted: String,
    pub modified_date: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileRef {
    #[serde(default)]
    pub filepath: String,
    #[serde(default)]
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub filename: String,
    pub filepath: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    pub size: u64,
    pub size_formatted: String,
}

impl From<&FileRecord> for FileSummary {
    fn from(record: &FileRecord) -> Self {
        Self {
            filename: record.filename.clone(),
            filepath: record.filepath.clone(),
            extension: Some(record.extension.clone()),
            size: record.size,
            size_formatted: record.size_formatted.clone(),
        }
    }
}

// API Request/Response types

/// Accepts both `{ "data": [params] }` and a bare params object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DataEnvelope<T> {
    Wrapped { data: Vec<T> },
    Bare(T),
}

impl<T> DataEnvelope<T> {
    pub fn into_first(self) -> Option<T> {
        match self {
            DataEnvelope::Wrapped { data } => data.into_iter().next(),
            DataEnvelope::Bare(params) => Some(params),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_term: Option<String>,
    pub folder_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalyzeParams {
    pub search_term: Option<String>,
    pub query: Option<String>,
    pub folder_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeFileParams {
    pub filepath: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeFilesRequest {
    pub files: Option<Vec<FileRef>>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum SearchAnalyzeData {
    NoMatches {
        search_term: String,
        files_found: usize,
        ai_response: Option<String>,
    },
    Analyzed {
        search_term: String,
        user_query: String,
        file: FileSummary,
        ai_response: String,
        model: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeFileData {
    pub user_query: String,
    pub file: FileSummary,
    pub ai_response: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub user_query: String,
    pub analysis_type: AnalysisMode,
    pub file_count: usize,
    pub files_analyzed: Vec<FileRef>,
    pub ai_response: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_accepts_wrapped_and_bare() {
        let wrapped: DataEnvelope<SearchAnalyzeParams> =
            serde_json::from_str(r#"{"data":[{"searchTerm":"q1","query":"total?"}]}"#).unwrap();
        let params = wrapped.into_first().unwrap();
        assert_eq!(params.search_term.as_deref(), Some("q1"));

        let bare: DataEnvelope<SearchAnalyzeParams> =
            serde_json::from_str(r#"{"searchTerm":"q2","query":"total?","folderPath":"/srv"}"#).unwrap();
        let params = bare.into_first().unwrap();
        assert_eq!(params.search_term.as_deref(), Some("q2"));
        assert_eq!(params.folder_path.as_deref(), Some("/srv"));

        let empty: DataEnvelope<SearchAnalyzeParams> = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(empty.into_first().is_none());
    }

    #[test]
    fn test_no_matches_serializes_null_response() {
        let body = ApiResponse::success(
            "No files found",
            SearchAnalyzeData::NoMatches {
                search_term: "budget".to_string(),
                files_found: 0,
                ai_response: None,
            },
        );
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "status": "success",
                "message": "No files found",
                "data": {"searchTerm": "budget", "filesFound": 0, "aiResponse": null}
            })
        );
    }
}
