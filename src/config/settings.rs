use std::path::PathBuf;

use crate::stats::temporal::BucketStrategy;

/// Ridge term added to the diagonal of the normal equations.
/// Keep it well below 1.0, the smallest diagonal entry of a team that played.
pub const DEFAULT_RIDGE: f64 = 1e-3;

#[derive(Debug, Clone)]
pub struct StatsSettings {
    pub ridge: f64,
    pub bucket: BucketStrategy,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            ridge: DEFAULT_RIDGE,
            bucket: BucketStrategy::CalendarHour,
        }
    }
}

impl StatsSettings {
    pub fn with_ridge(mut self, ridge: Option<f64>) -> Self {
        if let Some(ridge) = ridge {
            self.ridge = ridge.max(0.0);
        }
        self
    }

    pub fn with_bucket(mut self, bucket: Option<BucketStrategy>) -> Self {
        if let Some(bucket) = bucket {
            self.bucket = bucket;
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
    pub snapshot_path: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            snapshot_path: default_snapshot_path(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub stats: StatsSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn default_snapshot_path() -> PathBuf {
    std::env::var("SNAPSHOT_PATH")
        .unwrap_or_else(|_| "snapshot.json".to_string())
        .into()
}
