//! Prometheus metrics for the store and the todo domain.
//!
//! ```rust,no_run
//! use todo_board_runtime::metrics::install_recorder;
//!
//! let handle = install_recorder().expect("recorder");
//! let exposition = handle.render();
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

pub use metrics::{counter, gauge, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Install the global Prometheus recorder and register metric descriptions.
///
/// The returned handle renders the exposition text for `GET /metrics`.
///
/// # Errors
///
/// Returns [`MetricsError::Install`] if a global recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1],
        )
        .map_err(|e| MetricsError::Build(e.to_string()))?;

    let handle = builder
        .install_recorder()
        .map_err(|e| MetricsError::Install(e.to_string()))?;

    register_metrics();
    tracing::info!("Prometheus metrics recorder installed");
    Ok(handle)
}

/// Register all metric descriptions.
fn register_metrics() {
    // Store
    describe_counter!(
        "store.actions.total",
        "Total number of actions processed by the store reducer"
    );
    describe_histogram!(
        "store.reducer.duration_seconds",
        "Time taken by a single reducer call"
    );

    // Todo domain
    describe_counter!(
        "todo.events.applied",
        "Total number of todo events applied to the collection, by event type"
    );
    describe_counter!(
        "todo.commands.rejected",
        "Total number of todo commands rejected by validation"
    );
    describe_gauge!(
        "todo.collection.size",
        "Number of todos currently held by the store"
    );
}
