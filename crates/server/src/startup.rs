use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the application router for a validated configuration.
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = AppState::from_config(&cfg.store);
    routes::build_router(state, build_cors(), &cfg.server.server_url())
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn serve(mut cfg: AppConfig) -> anyhow::Result<()> {
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let app = build_app(&cfg);
    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port))
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;

    info!(
        %addr,
        public_url = %cfg.server.server_url(),
        seed_demo_data = cfg.store.seed_demo_data,
        first_id = cfg.store.first_id,
        "mini api listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("mini api stopped");
    Ok(())
}

async fn shutdown_signal() {
    shutdown_on(tokio::signal::ctrl_c()).await
}

async fn shutdown_on<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only on process exit");
        std::future::pending::<()>().await;
    }
    info!(service = "server", event = "shutdown_signal", "shutdown signal received");
}
