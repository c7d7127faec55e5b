use anyhow::Result;

use ftc_team_stats::cli::Command;
use ftc_team_stats::{handle_opr, handle_report, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Opr {
            snapshot,
            ridge,
            average,
        } => handle_opr(snapshot, ridge, average),
        Command::Report {
            team,
            snapshot,
            ridge,
            bucket,
        } => handle_report(team, snapshot, ridge, bucket),
        Command::Serve { port, snapshot } => handle_serve(port, snapshot),
    }
}
