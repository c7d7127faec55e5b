pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod loader;
pub mod rating;
pub mod services;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use serde::Serialize;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::{CorpusSnapshot, TeamNumber};
use crate::loader::FileLoader;
use crate::services::report::ReportService;
use crate::services::server::ServerService;
use crate::stats::BucketStrategy;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_opr(snapshot: Option<PathBuf>, ridge: Option<f64>, average_only: bool) -> Result<()> {
    let config = AppConfig::new();
    let path = snapshot.unwrap_or(config.server.snapshot_path);
    let service = ReportService::new(config.stats.with_ridge(ridge));

    let snapshot = load_snapshot(&path)?;
    if average_only {
        print_json(&service.league_average(&snapshot)?)
    } else {
        print_json(&service.league_table(&snapshot)?)
    }
}

pub fn handle_report(
    team: TeamNumber,
    snapshot: Option<PathBuf>,
    ridge: Option<f64>,
    bucket: Option<BucketStrategy>,
) -> Result<()> {
    let config = AppConfig::new();
    let path = snapshot.unwrap_or(config.server.snapshot_path);
    let service = ReportService::new(config.stats.with_ridge(ridge).with_bucket(bucket));

    let snapshot = load_snapshot(&path)?;
    let report = service
        .team_report(&snapshot, team)?
        .ok_or_else(|| anyhow::anyhow!("Team {} not found in {}", team, path.display()))?;
    print_json(&report)
}

pub fn handle_serve(port: u16, snapshot: Option<PathBuf>) -> Result<()> {
    let mut config = AppConfig::new();
    config.server.port = port;
    if let Some(path) = snapshot {
        config.server.snapshot_path = path;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(config);
        service.run().await
    })
}

fn load_snapshot(path: &Path) -> Result<CorpusSnapshot> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(FileLoader::new(path).snapshot())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
