//! API Module
//!
//! HTTP host exposing the contract operations.

pub mod handlers;
pub mod routes;
pub mod types;

use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

pub use handlers::{ApiState, NodeContract};
pub use routes::create_router;

/// Serve the API until ctrl-c.
pub async fn serve(contract: Arc<NodeContract>, bind_addr: &str) -> anyhow::Result<()> {
    let router = create_router(ApiState::new(contract));
    let listener = TcpListener::bind(bind_addr).await?;
    info!("HTTP API listening on {}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
