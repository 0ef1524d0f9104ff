//! kickfeed CLI
//!
//! Commands:
//! - `kickfeed live` - One aggregation pass, printed as a table or JSON
//! - `kickfeed watch` - Poll the aggregator on a fixed interval until Ctrl-C
//! - `kickfeed sources` - Show configured upstream sources in priority order

pub mod output;
pub mod watch;

use clap::{Parser, Subcommand};

/// Live football event aggregator
#[derive(Parser, Debug)]
#[command(name = "kickfeed")]
#[command(author, version, about = "Aggregate live football matches across upstream providers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (default.toml, {KICKFEED_ENV}.toml)
    #[arg(short, long, global = true, default_value = "config")]
    pub config: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch live matches once
    Live {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Also print per-source diagnostics
        #[arg(long)]
        report: bool,
    },
    /// Fetch live matches repeatedly until interrupted
    Watch {
        /// Seconds between aggregation passes
        #[arg(short, long, default_value = "30")]
        interval_secs: u64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List configured sources in priority order
    Sources,
}
