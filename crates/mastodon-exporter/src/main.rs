//! mastodon-exporter
//!
//! - Reads credentials from the environment; exits non-zero before binding if
//!   anything required is missing
//! - Logs the upstream application/version (best effort)
//! - Serves `/metrics` on `0.0.0.0:$PORT`; every scrape queries the admin API

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use mastodon_exporter::{app_state::AppState, config, router};
use mastodon_exporter_core::error::{ExporterError, Result};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "mastodon-exporter exiting");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_from_env()?;
    let (state, client) = AppState::from_config(&cfg)?;

    match client.verify().await {
        Ok((app, instance)) => tracing::info!(
            application = %app.name,
            version = %instance.version,
            base_url = %cfg.credentials.base_url(),
            "logged into mastodon"
        ),
        Err(e) => tracing::warn!(error = %e, "credential check failed; serving anyway"),
    }

    let listen = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let measures = state.catalog().len();
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ExporterError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, measures, "mastodon-exporter serving");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExporterError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
