//! Process bootstrap for the REST server.
//!
//! ```text
//! env vars / --config file
//!     → config (resolve, validate)
//!     → store connections (one per mount)
//!     → HttpServer (route tables, auth gate, middleware)
//!     → axum::serve with graceful shutdown
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mongo_rest::config::loader;
use mongo_rest::{HttpServer, Shutdown};

#[derive(Debug, Parser)]
#[command(name = "mongo-rest", about = "Generic REST API server for MongoDB collections")]
struct Cli {
    /// TOML configuration file. Without it, configuration comes from
    /// the environment (PORT, BASE, AUTH_TOKEN, PREFIXES, ...).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mongo_rest=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => loader::from_env()?,
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        mounts = config.mounts.len(),
        auth = config.auth_token.is_some(),
        "Configuration loaded"
    );

    let server = HttpServer::build(&config).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
