use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use file_analyst::{analysis::FileAnalyzer, config::Config, llm, routes::create_router, utils};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);
    info!("LLM configuration: {:?}", config.llm);

    if config.llm.api_key.is_empty() {
        warn!(provider = %config.llm.provider, "No API key configured, completion requests will fail");
    }

    let adapter = llm::create_adapter(&config.llm)
        .map_err(|e| anyhow::anyhow!("Failed to create LLM client: {}", e))?;
    let analyzer = FileAnalyzer::new(adapter, config.llm.model.clone(), config.files.default_folder.clone());

    // Create shared state
    let state = file_analyst::AppState { config: config.clone(), analyzer };

    // Create router
    let app = create_router(state);

    // Start server
    let ip: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((ip, config.server.port));
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
