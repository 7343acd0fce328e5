//! Khata CLI
//!
//! Reads a group snapshot (JSON) and prints balances or the settlement plan
//! as JSON on stdout. Logs go to stderr; set `RUST_LOG` to change the level.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use khata_core::{GroupLedger, GroupSnapshot, MemberBalance, MemberId, Settlement};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "khata")]
#[command(about = "Shared expense settlement calculator")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the transfers that settle the group
    Settle {
        /// Path to the group snapshot
        #[arg(env = "KHATA_SNAPSHOT")]
        snapshot: PathBuf,
    },

    /// Print every member's net balance
    Balances {
        #[arg(env = "KHATA_SNAPSHOT")]
        snapshot: PathBuf,
    },

    /// Print the snapshot's content hash
    Hash {
        #[arg(env = "KHATA_SNAPSHOT")]
        snapshot: PathBuf,
    },
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct SettleResponse {
    group: String,
    snapshot_hash: String,
    settlements: Vec<Settlement<MemberId>>,
}

#[derive(Serialize)]
struct BalancesResponse {
    group: String,
    balances: Vec<MemberBalance<MemberId>>,
}

#[derive(Serialize)]
struct HashResponse {
    group: String,
    snapshot_hash: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,khata_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let output = run(&cli)?;

    println!("{}", output);
    Ok(())
}

/// Execute one command and return the JSON to print
fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Commands::Settle { snapshot } => {
            let snapshot = load_snapshot(snapshot)?;
            let snapshot_hash = snapshot
                .content_hash()
                .context("Failed to hash snapshot")?;
            let ledger = restore(snapshot)?;
            let settlements = ledger.settlements();

            tracing::info!(
                group = %ledger.id(),
                settlements = settlements.len(),
                "settlement plan computed"
            );

            render(
                &SettleResponse {
                    group: ledger.id().to_string(),
                    snapshot_hash,
                    settlements,
                },
                cli.pretty,
            )
        }
        Commands::Balances { snapshot } => {
            let ledger = restore(load_snapshot(snapshot)?)?;

            render(
                &BalancesResponse {
                    group: ledger.id().to_string(),
                    balances: ledger.balances().to_member_balances(),
                },
                cli.pretty,
            )
        }
        Commands::Hash { snapshot } => {
            let snapshot = load_snapshot(snapshot)?;

            render(
                &HashResponse {
                    group: snapshot.id.to_string(),
                    snapshot_hash: snapshot
                        .content_hash()
                        .context("Failed to hash snapshot")?,
                },
                cli.pretty,
            )
        }
    }
}

fn load_snapshot(path: &Path) -> Result<GroupSnapshot> {
    tracing::debug!(path = %path.display(), "reading snapshot");

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    GroupSnapshot::from_json(&json)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

fn restore(snapshot: GroupSnapshot) -> Result<GroupLedger> {
    GroupLedger::from_snapshot(snapshot).context("Snapshot failed validation")
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize output")
}
