//! Channel historian daemon: records every observable channel event into an
//! append-only, date-partitioned log.

use anyhow::Result;
use clap::Parser;
use historian_runtime::{run_event_feed, Historian, HistorianConfig};
use tokio::io::BufReader;
use tracing::{info, warn};

mod bootstrap_helpers;
mod cli_args;

use bootstrap_helpers::init_tracing;
use cli_args::Cli;

fn daemon_version() -> String {
    format!("{}-{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let historian = Historian::new(HistorianConfig {
        log_root: cli.log_root,
        channel: cli.channel,
        login: cli.login,
        version: daemon_version(),
    })?;
    historian.record_started()?;

    let feed = BufReader::new(tokio::io::stdin());
    let outcome = tokio::select! {
        result = run_event_feed(feed, &historian) => match result {
            Ok(report) => {
                info!(
                    dispatched = report.dispatched,
                    malformed_skipped = report.malformed_skipped,
                    "event feed closed"
                );
                Ok(())
            }
            Err(error) => Err(error),
        },
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
            Ok(())
        }
    };

    // The final record is attempted on every exit path, best-effort.
    if let Err(error) = historian.record_shutdown() {
        warn!(error = %error, "failed to record shutdown");
    }

    outcome
}
