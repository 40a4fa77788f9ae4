use class_analytics::{build_state, config::ServerConfig, routes::build_router};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let state = build_state()?;
    tracing::info!(config = ?state.config, "analytics thresholds loaded");
    let app = build_router(state);

    let server = ServerConfig::from_env();
    let addr: SocketAddr = server.bind_addr().parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("analytics service listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
