use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::{ScoreLine, ScoreValue};

pub type TeamNumber = u32;

/// Competition phase a match was played in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Qualification,
    #[serde(alias = "playoff", alias = "semifinal", alias = "final")]
    Elimination,
    #[serde(other)]
    Other,
}

impl MatchType {
    pub fn as_str(&self) -> &str {
        match self {
            MatchType::Qualification => "qualification",
            MatchType::Elimination => "elimination",
            MatchType::Other => "other",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllianceColor {
    Red,
    Blue,
}

impl AllianceColor {
    pub fn opponent(self) -> Self {
        match self {
            AllianceColor::Red => AllianceColor::Blue,
            AllianceColor::Blue => AllianceColor::Red,
        }
    }
}

impl fmt::Display for AllianceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllianceColor::Red => f.write_str("red"),
            AllianceColor::Blue => f.write_str("blue"),
        }
    }
}

/// Event code and match number. Qualification and playoff matches are numbered
/// separately, so a match is only unique together with its `MatchType`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchKey {
    pub event_code: String,
    pub match_id: u32,
}

impl MatchKey {
    pub fn new(event_code: impl Into<String>, match_id: u32) -> Self {
        Self {
            event_code: event_code.into(),
            match_id,
        }
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.event_code, self.match_id)
    }
}

/// One alliance's participants and its four recorded scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllianceResult {
    pub teams: Vec<TeamNumber>,
    pub scores: ScoreLine,
}

impl AllianceResult {
    pub fn contains(&self, team: TeamNumber) -> bool {
        self.teams.contains(&team)
    }
}

/// A played match with both alliance results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub key: MatchKey,
    pub played_at: DateTime<Utc>,
    pub match_type: MatchType,
    pub red: AllianceResult,
    pub blue: AllianceResult,
}

impl MatchRecord {
    pub fn alliance(&self, color: AllianceColor) -> &AllianceResult {
        match color {
            AllianceColor::Red => &self.red,
            AllianceColor::Blue => &self.blue,
        }
    }

    pub fn alliances(&self) -> [(AllianceColor, &AllianceResult); 2] {
        [(AllianceColor::Red, &self.red), (AllianceColor::Blue, &self.blue)]
    }

    pub fn side_of(&self, team: TeamNumber) -> Option<AllianceColor> {
        self.alliances()
            .into_iter()
            .find(|(_, alliance)| alliance.contains(team))
            .map(|(color, _)| color)
    }

    pub fn involves(&self, team: TeamNumber) -> bool {
        self.side_of(team).is_some()
    }

    /// The match as seen by `team`, or `None` if the team did not play in it
    pub fn view_for(&self, team: TeamNumber) -> Option<TeamMatch> {
        let color = self.side_of(team)?;
        Some(TeamMatch {
            key: self.key.clone(),
            played_at: self.played_at,
            match_type: self.match_type,
            color,
            own: self.alliance(color).clone(),
            opponent: self.alliance(color.opponent()).clone(),
        })
    }
}

/// A match from one team's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMatch {
    pub key: MatchKey,
    pub played_at: DateTime<Utc>,
    pub match_type: MatchType,
    pub color: AllianceColor,
    pub own: AllianceResult,
    pub opponent: AllianceResult,
}

impl TeamMatch {
    /// Strictly greater total than the opposing alliance; ties are not wins.
    pub fn is_win(&self) -> bool {
        self.own.scores.total > self.opponent.scores.total
    }

    pub fn total_points(&self) -> ScoreValue {
        self.own.scores.total
    }
}

/// One competition attended by a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_code: String,
    pub name: Option<String>,
    pub placement: Option<u32>,
    pub awards: Vec<String>,
}

// --- Snapshot File Structures ---

/// Raw snapshot as written by the corpus fetcher
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    #[serde(default)]
    pub fetched_at: Option<String>,
    #[serde(default)]
    pub matches: Vec<MatchResponse>,
    #[serde(default)]
    pub events: Vec<EventResponse>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub event_code: String,
    pub match_id: u32,
    #[serde(default)]
    pub match_type: Option<MatchType>,
    pub timestamp: String,
    pub red: AllianceResponse,
    pub blue: AllianceResponse,
}

/// Score fields are optional here so a missing one is reported against its match.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllianceResponse {
    #[serde(default)]
    pub teams: Vec<TeamNumber>,
    pub auto_points: Option<ScoreValue>,
    pub tele_points: Option<ScoreValue>,
    pub endgame_points: Option<ScoreValue>,
    pub total_points: Option<ScoreValue>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub team: TeamNumber,
    pub event_code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub placement: Option<u32>,
    #[serde(default)]
    pub awards: Vec<String>,
}
