use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "historian",
    about = "Records channel events into append-only date-partitioned logs",
    version
)]
pub struct Cli {
    /// Directory under which all channel logs are written.
    #[arg(long = "log-root", env = "HISTORIAN_LOG_ROOT")]
    pub log_root: PathBuf,

    /// Identifier of the monitored channel.
    #[arg(long, env = "HISTORIAN_CHANNEL")]
    pub channel: String,

    /// Login of the daemon's own session, used to tell its own presence
    /// events apart from other users'.
    #[arg(long, env = "HISTORIAN_LOGIN")]
    pub login: String,
}
