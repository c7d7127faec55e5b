use anyhow::{Context, Result};
use axum::Router;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{AppState, create_router};
use crate::config::settings::AppConfig;
use crate::loader::FileLoader;

pub struct ServerService {
    config: AppConfig,
}

impl ServerService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<()> {
        let snapshot_path = &self.config.server.snapshot_path;
        info!("Serving statistics from snapshot {}", snapshot_path.display());

        let state = Arc::new(AppState {
            loader: FileLoader::new(snapshot_path),
            config: self.config.clone(),
        });

        let app = build_app(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.server.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// API router wrapped in request tracing and permissive CORS
pub fn build_app(state: Arc<AppState>) -> Router {
    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
