use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LLMConfig;
use crate::llm::openai::OpenAIAdapter;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Build the completion client for the configured provider.
///
/// All supported providers speak the OpenAI chat-completions protocol, so they
/// share one adapter and differ only in base URL. `base_url` overrides it.
pub fn create_adapter(config: &LLMConfig) -> AppResult<Arc<dyn LLMAdapter>> {
    let default_base = match config.provider.as_str() {
        "openai" => OPENAI_API_BASE,
        "openrouter" => OPENROUTER_API_BASE,
        "groq" => GROQ_API_BASE,
        other => {
            return Err(AppError::Internal(format!("Unsupported provider: {}", other)));
        }
    };

    let base = config.base_url.as_deref().unwrap_or(default_base);
    Ok(Arc::new(OpenAIAdapter::new_with_api_base(&config.api_key, base)))
}
