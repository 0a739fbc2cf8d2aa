use anyhow::{Context, Result};
use boathouse::server::{config::ServerConfig, serve, state_from_config};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ServerConfig::from_env().context("failed to load server configuration")?;
    let state = state_from_config(&config).context("failed to set up the admin account")?;

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, admin = %config.admin_username, "boat store started");

    serve(listener, state, shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Store internals at debug, one line per HTTP request from tower-http
const DEFAULT_LOG_FILTER: &str = "boathouse=debug,tower_http=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Resolves once the boat store should stop taking requests
async fn shutdown_signal() {
    let interrupted = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "Ctrl+C",
            Err(err) => {
                error!(error = %err, "boat store cannot listen for Ctrl+C");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminated = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                "SIGTERM"
            }
            Err(err) => {
                error!(error = %err, "boat store cannot listen for SIGTERM");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminated = std::future::pending::<&str>();

    let received = tokio::select! {
        name = interrupted => name,
        name = terminated => name,
    };

    info!(signal = received, "boat store draining in-flight requests");
}
