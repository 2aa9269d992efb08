// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, path::Path, sync::Arc};
use anyhow::Context;
use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::comparison_service::ComparisonService;
use crate::application::liner_repository::LinerRepository;
use crate::infrastructure::catalog_repository::CatalogLinerRepository;
use crate::infrastructure::config::{load_app_config, LinerSettings, LinerSource};
use crate::infrastructure::http_liner_repository::HttpLinerRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{compare_settings, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = build_repository(&config.liners)?;

    // Create services (application layer)
    let comparison_service = ComparisonService::new(repository, config.validation.pf_om_rule);

    // Create application state
    let state = Arc::new(AppState { comparison_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/setting-calculator/compare", post(compare_settings))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_addr))?;
    tracing::info!("Starting setting-calculator service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

fn build_repository(settings: &LinerSettings) -> anyhow::Result<Arc<dyn LinerRepository>> {
    match settings.source {
        LinerSource::Catalog => Ok(Arc::new(CatalogLinerRepository::load(Path::new(
            &settings.catalog_path,
        ))?)),
        LinerSource::Http => {
            let base_url = settings
                .base_url
                .clone()
                .context("liners.base_url is required when liners.source = \"http\"")?;
            Ok(Arc::new(HttpLinerRepository::new(base_url, settings.token.clone())))
        }
    }
}
