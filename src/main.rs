mod api;
mod app;
mod config;
mod document;
mod domain;
mod error;
mod logging;
mod middleware;
mod routes;
mod services;

use anyhow::{Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env().context("Invalid configuration")?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        font = ?settings.document_style.font,
        bullet = ?settings.document_style.bullet,
        max_upload_bytes = settings.max_upload_bytes,
        "Starting ironbid"
    );

    let server_addr = settings.server_addr.clone();

    // Create application state
    let state = app::AppState::new(settings);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("Failed to bind {server_addr}"))?;
    tracing::info!("Listening on {}", server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
