//! File analysis orchestration
//!
//! Ties the pipeline together for each request: validate the input, locate or accept
//! files, extract them in order, assemble the prompt, ask the completion API and
//! shape the response. Nothing is kept between requests.

pub mod prompt;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::extract::{self, extension_of};
use crate::llm::LLMAdapter;
use crate::models::{
    AnalysisData, AnalyzeFileData, AnalyzeFileParams, AnalyzeFilesRequest, ApiResponse, FileRecord,
    FileRef, FileSummary, SearchAnalyzeData, SearchAnalyzeParams,
};
use crate::search;
use crate::types::{AppError, AppResult, LLMRequest};
use crate::utils::format_file_size;

pub use prompt::{AnalysisMode, FileContent, Prompt, MAX_CONTENT_LENGTH, MAX_FILES};

pub const TEMPERATURE: f32 = 0.3;
pub const MAX_OUTPUT_TOKENS: u32 = 4000;

/// Answer text from the model for one assembled prompt.
#[derive(Debug, Clone)]
pub struct Completion {
    pub mode: AnalysisMode,
    pub answer: String,
    pub model: String,
}

#[derive(Clone)]
pub struct FileAnalyzer {
    llm: Arc<dyn LLMAdapter>,
    model: String,
    default_folder: PathBuf,
}

impl FileAnalyzer {
    pub fn new(llm: Arc<dyn LLMAdapter>, model: impl Into<String>, default_folder: impl Into<PathBuf>) -> Self {
        Self {
            llm,
            model: model.into(),
            default_folder: default_folder.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Absolute search root; relative folders resolve against the working directory.
    pub fn resolve_folder(&self, folder_path: Option<&str>) -> AppResult<PathBuf> {
        let folder = match folder_path.map(str::trim).filter(|f| !f.is_empty()) {
            Some(folder) => PathBuf::from(folder),
            None => self.default_folder.clone(),
        };

        if folder.is_absolute() {
            return Ok(folder);
        }
        let cwd = std::env::current_dir()
            .map_err(|e| AppError::Internal(format!("Cannot resolve working directory: {}", e)))?;
        Ok(cwd.join(folder))
    }

    #[instrument(skip(self))]
    pub async fn search(&self, search_term: Option<&str>, folder_path: Option<&str>) -> AppResult<Vec<FileRecord>> {
        let term = required(search_term, "Invalid search term")?.trim().to_string();
        let root = self.resolve_folder(folder_path)?;

        let files = tokio::task::spawn_blocking(move || search::search_files(&root, &term)).await??;
        info!(matches = files.len(), "Search completed");
        Ok(files)
    }

    /// Search by name and analyze the first match only.
    pub async fn search_and_analyze(
        &self,
        params: SearchAnalyzeParams,
    ) -> AppResult<ApiResponse<SearchAnalyzeData>> {
        let search_term = required(params.search_term.as_deref(), "Invalid search term")?;
        let user_query = required(params.query.as_deref(), "Please provide a question to analyze")?;

        let files = self.search(Some(search_term.as_str()), params.folder_path.as_deref()).await?;
        let Some(file) = files.first() else {
            return Ok(ApiResponse::success(
                "No files found",
                SearchAnalyzeData::NoMatches {
                    search_term,
                    files_found: 0,
                    ai_response: None,
                },
            ));
        };

        let parsed = extract::dispatch(Path::new(&file.filepath)).await?;
        let completion = self
            .complete(
                &[FileContent {
                    filename: file.filename.clone(),
                    content: parsed.text_content,
                }],
                &user_query,
            )
            .await?;

        Ok(ApiResponse::success(
            "Analysis completed successfully",
            SearchAnalyzeData::Analyzed {
                search_term,
                user_query,
                file: FileSummary::from(file),
                ai_response: completion.answer,
                model: completion.model,
            },
        ))
    }

    /// Analyze exactly one file given by path.
    pub async fn analyze_file(&self, params: AnalyzeFileParams) -> AppResult<ApiResponse<AnalyzeFileData>> {
        let filepath = required(params.filepath.as_deref(), "File not found")?;
        let user_query = required(params.query.as_deref(), "Please provide a question to analyze")?;

        let path = PathBuf::from(&filepath);
        ensure_exists(&path).await?;

        let parsed = extract::dispatch(&path).await?;
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| AppError::read(&path, e))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| filepath.clone());

        let completion = self
            .complete(
                &[FileContent {
                    filename: filename.clone(),
                    content: parsed.text_content,
                }],
                &user_query,
            )
            .await?;

        Ok(ApiResponse::success(
            "Analysis completed successfully",
            AnalyzeFileData {
                user_query,
                file: FileSummary {
                    filename,
                    extension: Some(extension_of(&path)),
                    filepath,
                    size: metadata.len(),
                    size_formatted: format_file_size(metadata.len()),
                },
                ai_response: completion.answer,
                model: completion.model,
            },
        ))
    }

    /// Analyze an explicit list of files; the mode follows from how many there are.
    #[instrument(skip(self, request))]
    pub async fn analyze_files(&self, request: AnalyzeFilesRequest) -> AppResult<ApiResponse<AnalysisData>> {
        let files = validate_files(request.files)?;
        let user_query = required(request.query.as_deref(), "Please provide a question to analyze")?;

        let mut contents = Vec::with_capacity(files.len());
        for file in &files {
            let path = Path::new(&file.filepath);
            ensure_exists(path).await?;

            let parsed = extract::dispatch(path).await?;
            contents.push(FileContent {
                filename: file.filename.clone(),
                content: parsed.text_content,
            });
        }

        let completion = self.complete(&contents, &user_query).await?;

        Ok(ApiResponse::success(
            completion.mode.success_message(),
            AnalysisData {
                user_query,
                analysis_type: completion.mode,
                file_count: files.len(),
                files_analyzed: files,
                ai_response: completion.answer,
                model: completion.model,
            },
        ))
    }

    /// Assemble the prompt for `files` and run one completion.
    pub async fn complete(&self, files: &[FileContent], user_query: &str) -> AppResult<Completion> {
        let prompt = Prompt::assemble(files, user_query)?;
        let mode = prompt.mode;

        let request = LLMRequest {
            model: self.model.clone(),
            messages: prompt.into_messages(),
            max_tokens: Some(MAX_OUTPUT_TOKENS),
            temperature: Some(TEMPERATURE),
        };

        let response = self.llm.create_chat_completion(&request).await?;
        if response.content.trim().is_empty() {
            return Err(AppError::LLMApi("No response from AI".to_string()));
        }

        info!(
            mode = ?mode,
            files = files.len(),
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            total_tokens = response.usage.total_tokens,
            "Completion received"
        );

        Ok(Completion {
            mode,
            answer: response.content,
            model: response.model,
        })
    }
}

/// The value as given, rejected when missing or blank.
fn required(value: Option<&str>, message: &str) -> AppResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

fn validate_files(files: Option<Vec<FileRef>>) -> AppResult<Vec<FileRef>> {
    let files = files.unwrap_or_default();
    if files.is_empty() {
        return Err(AppError::Validation(
            "At least one file is required for analysis".to_string(),
        ));
    }
    if files.len() > MAX_FILES {
        return Err(AppError::Validation(format!(
            "Maximum {} files allowed for analysis",
            MAX_FILES
        )));
    }
    if files
        .iter()
        .any(|f| f.filepath.trim().is_empty() || f.filename.trim().is_empty())
    {
        return Err(AppError::Validation(
            "Invalid file input. Provide array of {filepath, filename}".to_string(),
        ));
    }
    Ok(files)
}

async fn ensure_exists(path: &Path) -> AppResult<()> {
    match tokio::fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::NotFound(format!("File not found - {}", path.display()))),
        Err(e) => Err(AppError::read(path, e)),
    }
}
