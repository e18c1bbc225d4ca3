//! Static File Serving
//!
//! Serves the bundled frontend from the configured static directory. API routes
//! are merged first and take precedence.

use axum::{response::IntoResponse, routing::get, Router};
use std::path::Path;
use tower_http::services::ServeDir;
use tracing::{info, warn};

pub fn router(static_dir: &Path) -> Router {
    if static_dir.is_dir() {
        info!(path = %static_dir.display(), "Serving static files");
    } else {
        warn!(path = %static_dir.display(), "Static files directory not found");
    }

    let serve_dir = ServeDir::new(static_dir).append_index_html_on_directories(true);

    if static_dir.join("index.html").is_file() {
        Router::new().fallback_service(serve_dir)
    } else {
        Router::new()
            .route("/", get(server_running))
            .fallback_service(serve_dir)
    }
}

async fn server_running() -> impl IntoResponse {
    "Server is running..."
}
