use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::domain::{CorpusSnapshot, EventRecord, MatchRecord, SnapshotResponse, TeamNumber};

/// Source of raw corpus records.
///
/// Implementations may be slow or fail; callers await them before computing
/// any statistic and pass the result on explicitly.
pub trait CorpusLoader {
    /// All matches played by `team`, ordered by time
    fn team_matches(
        &self,
        team: TeamNumber,
    ) -> impl Future<Output = Result<Vec<MatchRecord>>> + Send;

    fn team_events(
        &self,
        team: TeamNumber,
    ) -> impl Future<Output = Result<Vec<EventRecord>>> + Send;

    /// Every match needed for a league-wide OPR solve
    fn full_corpus(&self) -> impl Future<Output = Result<Vec<MatchRecord>>> + Send;
}

/// Reads a JSON snapshot file. The file is re-read on every call, nothing is cached.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the whole snapshot
    pub async fn snapshot(&self) -> Result<CorpusSnapshot> {
        let response = self.read_response().await?;
        let snapshot = CorpusSnapshot::from_response(response)?;

        info!(
            "Loaded snapshot {} ({} matches, {} teams)",
            self.path.display(),
            snapshot.matches().len(),
            snapshot.teams().len()
        );
        Ok(snapshot)
    }

    async fn read_response(&self) -> Result<SnapshotResponse> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot file {}", self.path.display()))?;

        debug!("Read {} bytes from {}", json.len(), self.path.display());

        serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                self.path,
                json.chars().take(200).collect::<String>()
            )
        })
    }
}

impl CorpusLoader for FileLoader {
    async fn team_matches(&self, team: TeamNumber) -> Result<Vec<MatchRecord>> {
        Ok(self.snapshot().await?.team_match_records(team))
    }

    async fn team_events(&self, team: TeamNumber) -> Result<Vec<EventRecord>> {
        Ok(self.snapshot().await?.team_events(team).to_vec())
    }

    async fn full_corpus(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.snapshot().await?.matches().to_vec())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::errors::StatsError;

    pub(crate) const SNAPSHOT_JSON: &str = r#"{
        "fetchedAt": "2024-11-17T08:00:00Z",
        "matches": [
            {
                "eventCode": "USCAFFQ", "matchId": 2, "matchType": "qualification",
                "timestamp": "2024-11-16T10:20:00Z",
                "red": {"teams": [11115, 16091], "autoPoints": 20, "telePoints": 60, "endgamePoints": 15, "totalPoints": 100},
                "blue": {"teams": [7390, 19876], "autoPoints": 10, "telePoints": 40, "endgamePoints": 10, "totalPoints": 65}
            },
            {
                "eventCode": "USCAFFQ", "matchId": 1, "matchType": "qualification",
                "timestamp": "2024-11-16T09:50:00Z",
                "red": {"teams": [11115, 7390], "autoPoints": 12, "telePoints": 30, "endgamePoints": 5, "totalPoints": 50},
                "blue": {"teams": [16091, 19876], "autoPoints": 14, "telePoints": 30, "endgamePoints": 6, "totalPoints": 50}
            },
            {
                "eventCode": "USCAFFQ", "matchId": 30, "matchType": "playoff",
                "timestamp": "2024-11-16T15:05:00Z",
                "red": {"teams": [11115, 19876], "autoPoints": 25, "telePoints": 70, "endgamePoints": 20, "totalPoints": 120},
                "blue": {"teams": [16091, 7390], "autoPoints": 18, "telePoints": 55, "endgamePoints": 15, "totalPoints": 95}
            }
        ],
        "events": [
            {"team": 11115, "eventCode": "USCAFFQ", "name": "Fresno Qualifier", "placement": 2, "awards": ["Inspire Award"]},
            {"team": 11115, "eventCode": "USCALAM", "name": "LA Meet", "awards": ["Think Award", "Inspire Award"]},
            {"team": 24000, "eventCode": "USCALAM", "placement": 9}
        ]
    }"#;

    pub(crate) fn write_snapshot(name: &str, json: &str) -> PathBuf {
        let file = format!("ftc_team_stats_{}_{}.json", name, std::process::id());
        let path = std::env::temp_dir().join(file);
        std::fs::write(&path, json).unwrap();
        path
    }

    #[tokio::test]
    async fn test_snapshot_is_loaded_and_sorted() {
        let path = write_snapshot("loader_sorted", SNAPSHOT_JSON);
        let loader = FileLoader::new(&path);

        let snapshot = loader.snapshot().await.unwrap();
        let ids: Vec<u32> = snapshot.matches().iter().map(|m| m.key.match_id).collect();

        assert_eq!(ids, vec![1, 2, 30]);
        assert_eq!(snapshot.team_events(11115).len(), 2);

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_loader_contract() {
        let path = write_snapshot("loader_contract", SNAPSHOT_JSON);
        let loader = FileLoader::new(&path);

        assert_eq!(loader.full_corpus().await.unwrap().len(), 3);
        assert_eq!(loader.team_matches(7390).await.unwrap().len(), 3);
        assert!(loader.team_matches(24000).await.unwrap().is_empty());
        assert_eq!(loader.team_events(24000).await.unwrap()[0].placement, Some(9));

        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let loader = FileLoader::new("/nonexistent/snapshot.json");
        let err = loader.snapshot().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read snapshot file"));
    }

    #[tokio::test]
    async fn test_malformed_match_surfaces_stats_error() {
        let json = SNAPSHOT_JSON.replace("[11115, 16091]", "[11115, 11115]");
        let path = write_snapshot("loader_malformed", &json);

        let err = FileLoader::new(&path).snapshot().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StatsError>(),
            Some(StatsError::DuplicateTeam { team: 11115, .. })
        ));

        std::fs::remove_file(path).unwrap();
    }
}
