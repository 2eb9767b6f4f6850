//! HTTP server setup and configuration.
//!
//! The router built here is shared by the production server and the
//! integration tests.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    api,
    command::{Artifact, ImageCommand},
    config::ServerConfig,
    error::ApiError,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config: Arc::new(config) }
    }

    /// Run a command on the blocking pool so large images do not stall other requests
    pub async fn execute(&self, command: ImageCommand, bytes: Vec<u8>) -> Result<Artifact, ApiError> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || command.execute(&bytes, &config.palette))
            .await
            .map_err(|e| ApiError::Internal(format!("Processing task failed: {e}")))?
            .map_err(ApiError::from)
    }
}

/// Build the API router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    let body_limit = state.config.max_body_bytes;

    Router::new()
        // Liveness
        .route("/", get(api::root))
        .route("/health", get(api::health))
        // Colour analysis
        .route("/palette", post(api::extract_palette))
        .route("/analyze-colors", post(api::analyze_colors))
        .route("/get-pixel-color", post(api::get_pixel_color))
        .route("/image-dimensions", post(api::image_dimensions))
        // Outlines
        .route("/generate-outline", post(api::generate_outline))
        .route("/generate-advanced-outline", post(api::generate_advanced_outline))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    // Credentials cannot be combined with wildcards, so methods and headers are mirrored
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Bind and serve until Ctrl+C
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_address();
    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Hueseum API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
