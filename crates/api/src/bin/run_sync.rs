//! Manual sync runner
//!
//! Syncs or disables one customer by id, or bulk-syncs the first `--limit`
//! members of the primary store when no id is given. Prints the resulting
//! report as JSON.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use shopbridge_app::utils::logging::init_tracing;
use shopbridge_app::AppContext;
use shopbridge_domain::constants::DEFAULT_BULK_LIMIT;
use shopbridge_domain::CustomerId;
use shopbridge_infra::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    Sync,
    Disable,
}

#[derive(Debug, Parser)]
#[command(name = "shopbridge-sync", about = "Run a customer sync by hand", version)]
struct Args {
    /// Primary-store customer id; bulk sync when omitted
    #[arg(long)]
    id: Option<u64>,

    #[arg(long, value_enum, default_value_t = Action::Sync)]
    action: Action,

    /// Customers to scan in bulk mode
    #[arg(long, default_value_t = DEFAULT_BULK_LIMIT)]
    limit: u32,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match args.config {
        Some(path) => config::load_from_file(Some(path)),
        None => config::load(),
    }
    .context("failed to load configuration")?;
    let ctx = AppContext::new(config).context("failed to build application context")?;

    let output = match (args.id.map(CustomerId::new), args.action) {
        (Some(id), Action::Sync) => {
            serde_json::to_string_pretty(&ctx.sync.sync_customer(id).await)?
        }
        (Some(id), Action::Disable) => {
            serde_json::to_string_pretty(&ctx.sync.disable_customer(id).await)?
        }
        (None, Action::Sync) => {
            let results = ctx.sync.sync_members(args.limit).await.context("bulk sync failed")?;
            serde_json::to_string_pretty(&results)?
        }
        (None, Action::Disable) => bail!("--action disable requires --id"),
    };

    println!("{output}");
    Ok(())
}
