//! Application state for Axum handlers.

use crate::TodoStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The todo store
    pub store: Arc<TodoStore>,
    /// Prometheus handle; `GET /metrics` answers 404 without one
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state around `store`.
    #[must_use]
    pub const fn new(store: Arc<TodoStore>) -> Self {
        Self {
            store,
            metrics: None,
        }
    }

    /// Attach the Prometheus handle used by `GET /metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
