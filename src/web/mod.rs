//! Web module - HTTP surface of the dashboard

mod error;
mod handlers;
pub mod page;
mod request_tracing;

use crate::config::DashboardConfig;
use crate::data::SalesTable;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

pub use error::ApiError;

/// Shared, read-only router state.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<SalesTable>,
    pub config: Arc<DashboardConfig>,
    pub(crate) request_counter: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(table: SalesTable, config: DashboardConfig) -> Self {
        Self {
            table: Arc::new(table),
            config: Arc::new(config),
            request_counter: Arc::new(AtomicU64::new(0)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard_handler))
        .route("/api/report", get(handlers::report_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .layer(from_fn_with_state(
            state.clone(),
            request_tracing::request_tracing_middleware,
        ))
        .with_state(state)
}
