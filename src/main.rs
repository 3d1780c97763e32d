//! instance-info service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use instance_info::{router, AppConfig, AppState, MetadataResolver, PublicIpResolver};

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .json()
        .init();

    let config = AppConfig::from_env()?;
    info!("Starting instance-info responder");

    let client = Client::builder()
        .timeout(config.lookup_timeout)
        .build()
        .context("Failed to create HTTP client")?;

    let state = AppState {
        metadata: Arc::new(MetadataResolver::new(&config, client.clone())),
        public_ip: Arc::new(PublicIpResolver::new(&config, client)),
    };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("instance-info listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
