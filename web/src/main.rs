//! Todo board server.
//!
//! Run with: `cargo run --bin todo-board`
//! Page: <http://127.0.0.1:3000/>
//! Metrics: <http://127.0.0.1:3000/metrics>

use anyhow::Context;
use std::sync::Arc;
use todo_board::{seed, TodoEnvironment, TodoLimits, TodoReducer};
use todo_board_core::environment::SystemClock;
use todo_board_runtime::metrics::install_recorder;
use todo_board_web::{init_tracing, router::router, AppState, Config, TodoStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.server.log_level)?;

    info!(addr = %config.server.socket_addr(), "Starting todo board");

    let metrics = install_recorder()?;

    let initial_state = match &config.store.seed_path {
        Some(path) => {
            info!(path = %path.display(), "Loading seed file");
            seed::load_state_from_path(path)?
        },
        None => seed::sample_state()?,
    };
    info!(todos = initial_state.count(), "Seed loaded");

    let environment = TodoEnvironment::new(Arc::new(SystemClock)).with_limits(TodoLimits {
        max_title_len: config.store.max_title_len,
    });
    let store = Arc::new(TodoStore::new(initial_state, TodoReducer::new(), environment));

    let app = router(AppState::new(Arc::clone(&store)).with_metrics(metrics));

    let listener = tokio::net::TcpListener::bind(config.server.socket_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.server.socket_addr()))?;
    info!(addr = %listener.local_addr()?, "Listening");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            // Server stopped on its own; nothing left to drain.
            result??;
            return Ok(());
        },
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
        },
    }

    info!("Shutdown signal received");
    store.shutdown();
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(config.server.shutdown_timeout, server).await {
        Ok(result) => result??,
        Err(_) => warn!(
            timeout_secs = config.server.shutdown_timeout.as_secs(),
            "In-flight requests did not finish before the shutdown timeout"
        ),
    }

    info!("Todo board stopped");
    Ok(())
}
