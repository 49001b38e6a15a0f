//! codefetch server entry point.
//!
//! Serves the HTTP API by default, or the MCP tool server on stdio when
//! `transport = "stdio"`. Logging goes to stderr to avoid interfering with the
//! JSON-RPC protocol on stdout.

use anyhow::Result;
use codefetch_core::{AppConfig, Transport};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod http;
mod service;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("failed to load .env: {e}");
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        transport = ?config.transport,
        serpapi_key = config.require_serpapi_api_key().is_ok(),
        "starting codefetch"
    );

    let state = service::AppState::from_config(config)?;

    let transport = state.config.transport;

    match transport {
        Transport::Http => {
            let addr = state.config.bind_addr();
            http::serve(&addr, state).await?;
        }
        Transport::Stdio => {
            let server = serve_server(handler::CodeFetchServer::new(state), stdio()).await?;
            server.waiting().await?;
        }
    }

    Ok(())
}
