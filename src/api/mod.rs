// src/api/mod.rs

//! HTTP surface.
//!
//! Two request shapes share the same [`ConversionService`]:
//! - synchronous: `POST <sync_path>` waits for the job and returns the YAML
//! - asynchronous: `POST <async_path>` returns `202` with a job id, and
//!   `GET <result_path>/{jobID}` polls for the result

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::engine::ConversionService;

pub use error::ApiError;

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<ConversionService>,
    /// Prefix used to build `resultURL` in async responses.
    pub result_path: Arc<str>,
}

/// Build the router for the configured paths.
pub fn router(service: Arc<ConversionService>, server: &ServerConfig) -> Router {
    let state = AppState {
        service,
        result_path: Arc::from(server.result_path.as_str()),
    };

    Router::new()
        .route(
            &server.sync_path,
            post(handlers::convert_sync).fallback(handlers::post_only),
        )
        .route(
            &server.async_path,
            post(handlers::convert_async).fallback(handlers::post_only),
        )
        .route(
            &format!("{}/:job_id", server.result_path),
            get(handlers::get_result).fallback(handlers::get_only),
        )
        .route("/healthz", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
