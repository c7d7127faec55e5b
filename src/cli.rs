use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::TeamNumber;
use crate::stats::BucketStrategy;

#[derive(Parser, Debug)]
#[command(author, version, about = "FTC team performance statistics")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Print the OPR of every team in a snapshot
    Opr {
        /// Snapshot file (defaults to $SNAPSHOT_PATH or snapshot.json)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        /// Ridge term of the least-squares solve
        #[arg(long)]
        ridge: Option<f64>,
        /// Print only the league-wide average per channel
        #[arg(long)]
        average: bool,
    },
    /// Print the dashboard statistics of one team
    Report {
        /// Team number
        team: TeamNumber,
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        ridge: Option<f64>,
        /// calendar-hour, hour-of-day or sequential[:N]
        #[arg(short, long)]
        bucket: Option<BucketStrategy>,
    },
    /// Serve the statistics over HTTP
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },
}
