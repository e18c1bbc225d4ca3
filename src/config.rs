use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub llm: LLMConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Search root used when a request does not name a folder
    pub default_folder: PathBuf,
}

#[derive(Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
}

// Keeps the API key out of log lines.
impl std::fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

pub const DEFAULT_FILES_FOLDER: &str = "uploads/documents";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gpt-4.1";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let provider = env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string());
        let api_key = match provider.as_str() {
            "openrouter" => env::var("OPENROUTER_API_KEY"),
            "groq" => env::var("GROQ_API_KEY"),
            _ => env::var("OPENAI_API_KEY"),
        }
        .unwrap_or_default();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                static_dir: env::var("STATIC_DIR")
                    .unwrap_or_else(|_| "public".to_string())
                    .into(),
            },
            files: FilesConfig {
                default_folder: env::var("FILES_FOLDER")
                    .unwrap_or_else(|_| DEFAULT_FILES_FOLDER.to_string())
                    .into(),
            },
            llm: LLMConfig {
                provider,
                api_key,
                base_url: env::var("LLM_BASE_URL").ok().filter(|s| !s.trim().is_empty()),
                model: env::var("ANALYSIS_MODEL")
                    .unwrap_or_else(|_| DEFAULT_ANALYSIS_MODEL.to_string()),
            },
        })
    }
}
