//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The split endpoint
//! - Health checks
//! - JSON error responses
//! - Router-wide HTTP layers (tracing, CORS, timeout, body limit)

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use billsplit_core::split::SplitEngine;
use billsplit_shared::config::HttpConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Split engine configured with the default currency.
    pub engine: Arc<SplitEngine>,
}

impl AppState {
    /// Wraps an engine for sharing across handlers.
    #[must_use]
    pub fn new(engine: SplitEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .fallback(error::not_found)
        .layer(RequestBodyLimitLayer::new(http.body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(http.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
