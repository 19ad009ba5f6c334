//! Streamcheck server: HTTP entry point and process bootstrap around the
//! verification engine.
mod config;
mod context;
mod error;
mod router;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use streamcheck_engine::Verifier;

pub use config::{ConfigError, RequestLimits, ServerConfig};
pub use context::AppContext;
pub use error::ApiError;
pub use router::build_router;
pub use routes::VerifyParams;

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let ctx = AppContext::new(Arc::new(Verifier::new(config.engine.clone())), config.limits);
    let app = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    engine_info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    engine_info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => engine_info!("Shutdown signal received"),
        Err(err) => {
            // Without a signal handler the server runs until killed.
            engine_warn!("Could not install Ctrl-C handler: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
