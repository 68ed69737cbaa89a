//! # HTTP Surface
//!
//! Web pages for browsing and managing registered networks, plus the JSON scan
//! endpoint the pages call.

mod error;
mod handlers;
mod pages;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use sweepr_core::{CidrRegistry, LivenessScanner};

pub use error::ApiResult;

#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<LivenessScanner>,
    /// Serializes read-modify-write cycles on the registry file.
    pub registry: Arc<Mutex<CidrRegistry>>,
}

impl AppState {
    pub fn new(scanner: LivenessScanner, registry: CidrRegistry) -> Self {
        Self {
            scanner: Arc::new(scanner),
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/manage",
            get(handlers::manage_page).post(handlers::manage_submit),
        )
        .route("/scan/{*cidr}", get(handlers::scan))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
