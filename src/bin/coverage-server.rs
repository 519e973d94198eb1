//! Coverage Engine HTTP Server Binary
//!
//! Loads the calculator configuration, sets up logging, and serves the
//! coverage API.
//!
//! # Usage
//!
//! ```bash
//! COVERAGE_CONFIG_DIR=./config/default cargo run --bin coverage-server
//! ```
//!
//! # Environment Variables
//!
//! - `COVERAGE_CONFIG_DIR`: Configuration directory (default: ./config/default)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use coverage_engine::api::{AppState, create_router};
use coverage_engine::config::ConfigLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config_dir =
        env::var("COVERAGE_CONFIG_DIR").unwrap_or_else(|_| "./config/default".to_string());
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir))?;
    info!(
        config_dir = %config_dir,
        models = config.models().len(),
        months_per_year = config.settings().months_per_year,
        buffer_enabled = config.settings().buffer.enabled,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Coverage server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
