//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use metascan_core::Config;
use metascan_processing::{ExifToolExtractor, WkhtmltopdfRenderer};
use metascan_storage::create_storage_areas;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_tracing(config.log_format())
        .context("Failed to initialize tracing")?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    // Both areas start empty on every run
    let storage = create_storage_areas(&config)
        .await
        .context("Failed to prepare storage areas")?;

    let extractor = Arc::new(ExifToolExtractor::from_config(&config));
    let renderer = Arc::new(WkhtmltopdfRenderer::from_config(&config));

    let state = AppState::new(config.clone(), storage, extractor, renderer)
        .context("Failed to build report pipeline")?;

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
