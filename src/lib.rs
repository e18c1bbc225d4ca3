// File Analyst - locate documents, extract their text and answer questions with an LLM

pub mod config;
pub mod models;
pub mod types;
pub mod extract;   // Per-format text extraction and dispatch
pub mod search;    // Recursive filename search
pub mod analysis;  // Prompt assembly and request orchestration
pub mod llm;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
