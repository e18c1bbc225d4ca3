//! API Routes
//!
//! - `/api/fileanalysis/*` - file search and AI analysis
//! - `/api/health`, `/api/hello` - liveness
//! - `/` - static files from the configured directory

pub mod files;
pub mod health;
pub mod static_files;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors_layer;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);
    let static_router = static_files::router(&state.config.server.static_dir);

    let api_router = Router::new()
        .merge(files::router(state))
        .merge(health::router());

    Router::new()
        .merge(api_router)
        .merge(static_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
