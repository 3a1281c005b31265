//! ShopBridge webhook server
//!
//! Receives customer webhooks from the primary store and mirrors member
//! customers into every secondary store.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use shopbridge_app::utils::logging::init_tracing;
use shopbridge_app::{build_router, AppContext};
use shopbridge_infra::config;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "shopbridge", about = "Customer sync webhook server", version)]
struct Args {
    /// Port to listen on (overrides `PORT`)
    #[arg(long)]
    port: Option<u16>,

    /// Configuration file (JSON or TOML); environment variables otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(err) = dotenv {
        warn!(error = %err, "no .env file loaded");
    }

    let config = match args.config {
        Some(path) => config::load_from_file(Some(path)),
        None => config::load(),
    }
    .context("failed to load configuration")?;

    let port = args.port.unwrap_or(config.server.port);
    let ctx = AppContext::new(config).context("failed to build application context")?;
    let app = build_router(Arc::new(ctx));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "shopbridge listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
