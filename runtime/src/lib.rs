//! # Todo Board Runtime
//!
//! The Store runtime: owns the one copy of state and runs the reducer for
//! every action against it.
//!
//! ## Example
//!
//! ```ignore
//! use todo_board_runtime::Store;
//!
//! let store = Store::new(initial_state, reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use todo_board_core::reducer::Reducer;
use tokio::sync::RwLock;

pub use error::StoreError;
pub use health::{HealthCheck, HealthStatus};

/// Health reporting for the store
pub mod health;

/// Prometheus metrics for observability
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

/// The Store - runtime for a reducer
///
/// The Store manages:
/// 1. State (behind `RwLock`, the single owner of the value)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
///
/// The reducer always runs against the state currently held by the store,
/// under the write lock, so concurrent senders are serialized and never work
/// from a stale copy.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + std::fmt::Debug + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Send an action to the store
    ///
    /// 1. Acquires the write lock on state
    /// 2. Calls reducer with (state, action, environment)
    /// 3. Releases the lock
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        self.send_and_read(action, |_| ()).await
    }

    /// Send an action and read the resulting state before any other action
    /// can run
    ///
    /// Request handlers use this to report the outcome of their own command
    /// (e.g. a validation error) without racing concurrent senders.
    ///
    /// ```ignore
    /// let error = store.send_and_read(action, |s| s.last_error.clone()).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`Store::send`].
    #[tracing::instrument(skip(self, action, f), name = "store_send")]
    pub async fn send_and_read<F, T>(&self, action: A, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&S) -> T,
    {
        if self.shutdown.load(Ordering::SeqCst) {
            tracing::warn!("Rejecting action, store is shutting down");
            return Err(StoreError::ShutdownInProgress);
        }

        let mut state = self.state.write().await;

        tracing::trace!(?action, "Reducing action");
        let start = Instant::now();
        self.reducer.reduce(&mut *state, action, &self.environment);
        metrics::histogram!("store.reducer.duration_seconds")
            .record(start.elapsed().as_secs_f64());
        metrics::counter!("store.actions.total").increment(1);

        Ok(f(&*state))
    }

    /// Read current state via a closure
    ///
    /// ```ignore
    /// let count = store.state(|s| s.todos.len()).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&*state)
    }

    /// Stop accepting new actions
    ///
    /// Actions already inside `send` run to completion because they hold the
    /// state lock.
    pub fn shutdown(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            tracing::info!("Store shutdown initiated");
        }
    }

    /// Returns true once [`Store::shutdown`] has been called
    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Report the store's health
    #[must_use]
    pub fn health(&self) -> HealthCheck {
        if self.is_shutting_down() {
            HealthCheck::unhealthy("store", "Store is shutting down")
        } else {
            HealthCheck::healthy("store")
        }
    }
}
