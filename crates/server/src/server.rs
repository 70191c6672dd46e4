use axum::{Router, routing::get};
use gateway::Gateway;
use ledger::ThresholdMonitor;

use std::{future::Future, sync::Arc};

use crate::expenses;

#[derive(Clone)]
pub struct ServerState {
    pub gateway: Arc<Gateway>,
    pub monitor: ThresholdMonitor,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/summary", get(expenses::summary))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .with_state(state)
}

/// Serves the expenses API on `listener` until `shutdown` resolves.
pub async fn run_with_listener<F>(
    gateway: Arc<Gateway>,
    monitor: ThresholdMonitor,
    listener: tokio::net::TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState { gateway, monitor };

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
