//! HealthHub server
//!
//! Serves user-population statistics for the HealthHub dashboards:
//! - `/users/*` JSON endpoints backed by `UserMetricsService`
//! - `/healthz`, `/readyz`, `/metrics`
//! - Graceful shutdown on Ctrl-C (readiness flips to draining first)

use tracing_subscriber::{fmt, EnvFilter};

use healthhub_server::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = config::config_path();
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen = cfg.server.listen_addr().expect("server.listen validated at load");

    let state = app_state::AppState::from_config(cfg).expect("app state init failed");
    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "healthhub-server starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .expect("server failed");

    tracing::info!("healthhub-server stopped");
}

async fn shutdown_signal(state: app_state::AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    state.set_draining();
    tracing::info!("shutdown requested, draining");
}
