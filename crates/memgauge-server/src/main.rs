//! memgauge server
//!
//! - `/metrics` and `/memory/` expose Prometheus text
//! - demo routes `/`, `/time/`, `/fail/` are instrumented
//! - config from `$MEMGAUGE_CONFIG` (default `memgauge.yaml`), defaults when absent

use std::path::Path;

use tracing_subscriber::{fmt, EnvFilter};

use memgauge_core::error::{MemgaugeError, Result};
use memgauge_server::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "memgauge.yaml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("memgauge-server: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("MEMGAUGE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let from_file = Path::new(&path).exists();
    let cfg = if from_file {
        config::load_from_file(&path)?
    } else {
        config::AppConfig::default()
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&cfg.logging.filter)
            .map_err(|e| MemgaugeError::Configuration(format!("logging.filter: {e}")))?,
    };
    fmt().with_env_filter(filter).init();

    let listen = cfg.server.listen_addr()?;
    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    if !from_file {
        tracing::info!(config = %path, "config file not found, using defaults");
    }
    tracing::info!(%listen, "memgauge-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MemgaugeError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MemgaugeError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
