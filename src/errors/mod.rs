use thiserror::Error;

use crate::domain::{AllianceColor, Channel, MatchKey, MatchType, TeamNumber};

/// Malformed-input conditions. Each variant names the offending match or event.
///
/// No-data conditions are never errors; they surface as `None` fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("match {key}: team {team} listed more than once on the {alliance} alliance")]
    DuplicateTeam {
        key: MatchKey,
        alliance: AllianceColor,
        team: TeamNumber,
    },

    #[error("match {key}: team {team} appears on both alliances")]
    TeamOnBothAlliances { key: MatchKey, team: TeamNumber },

    #[error("match {key}: {alliance} alliance has {size} teams, expected 2 to 3")]
    AllianceSize {
        key: MatchKey,
        alliance: AllianceColor,
        size: usize,
    },

    #[error("match {key}: {alliance} alliance is missing its {channel} score")]
    MissingScore {
        key: MatchKey,
        alliance: AllianceColor,
        channel: Channel,
    },

    #[error("match {key}: {alliance} alliance has a non-finite {channel} score")]
    NonFiniteScore {
        key: MatchKey,
        alliance: AllianceColor,
        channel: Channel,
    },

    #[error("match {key}: unparseable timestamp '{value}'")]
    InvalidTimestamp { key: MatchKey, value: String },

    #[error("{match_type} match {key} appears more than once in the corpus")]
    DuplicateMatch { key: MatchKey, match_type: MatchType },

    #[error("event {event_code} for team {team}: placement must be at least 1")]
    InvalidPlacement { event_code: String, team: TeamNumber },
}

pub type StatsResult<T> = Result<T, StatsError>;
