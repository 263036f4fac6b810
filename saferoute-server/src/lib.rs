//! HTTP and command line front end for the safety-aware route scorer.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use std::path::Path;

use tracing::info;

pub use config::{ConfigError, ServerConfig, load_config};
pub use router::create_router;
pub use state::AppState;

/// Serves the API until Ctrl-C is received
///
/// # Errors
///
/// Returns an error if the state cannot be built or the listener fails.
pub async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = config.server.socket_addr()?;
    let state = AppState::new(config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Routes one request file, returning either the path response or GeoJSON as JSON text
///
/// # Errors
///
/// Returns an error if the file cannot be read or the request is invalid.
pub fn route_file(
    config: &ServerConfig,
    request: &Path,
    geojson: bool,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let state = AppState::new(config.clone())?;
    let content = std::fs::read_to_string(request)?;

    if geojson {
        let request: saferoute::SafeRouteRequest = serde_json::from_str(&content)?;
        let collection = saferoute::route_geojson(state.scorer(), &request)?
            .ok_or(saferoute_core::Error::NoRouteFound)?;
        Ok(serde_json::to_string_pretty(&collection)?)
    } else {
        Ok(saferoute::route_json(state.scorer(), &content)?)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
