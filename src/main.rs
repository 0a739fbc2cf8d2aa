use anyhow::{Context, Result};
use boathouse::cli::App;
use boathouse::connection::config::ConnectionConfig;
use boathouse::connection::http::HttpTransportFactory;
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boathouse")]
#[command(about = "Terminal client for the boat store")]
struct Cli {
    /// Base URL of the boat store; may carry `user:password@`
    #[arg(long, env = "BOATHOUSE_URL", default_value = "http://localhost:8080")]
    url: String,
    /// Username pre-filled in the login form
    #[arg(long)]
    username: Option<String>,
    /// Password pre-filled in the login form
    #[arg(long)]
    password: Option<String>,
    /// Write logs to this file; the terminal is taken by the UI
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let mut config = ConnectionConfig::from_url(&cli.url).context("invalid --url")?;
    if let Some(username) = &cli.username {
        config = config.username(username);
    }
    if let Some(password) = &cli.password {
        config = config.password(password);
    }
    tracing::info!(url = %config.to_url(), "starting boathouse client");

    let prefill = config.credentials();
    let factory = Arc::new(HttpTransportFactory::new(config));
    let mut app = App::new(factory, prefill);
    app.run().await
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("boathouse=debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
