use std::collections::{BTreeMap, HashSet};

use crate::domain::models::{
    AllianceColor, AllianceResult, EventRecord, MatchKey, MatchRecord, MatchType, TeamNumber,
};
use crate::domain::score::Channel;
use crate::errors::{StatsError, StatsResult};

pub const MIN_ALLIANCE_SIZE: usize = 2;
pub const MAX_ALLIANCE_SIZE: usize = 3;

/// Rejects the whole corpus on the first malformed match.
pub fn validate_corpus(matches: &[MatchRecord]) -> StatsResult<()> {
    let mut seen: HashSet<(MatchType, &MatchKey)> = HashSet::with_capacity(matches.len());

    for record in matches {
        validate_match(record)?;
        if !seen.insert((record.match_type, &record.key)) {
            return Err(StatsError::DuplicateMatch {
                key: record.key.clone(),
                match_type: record.match_type,
            });
        }
    }

    Ok(())
}

/// Placements are ordinal ranks starting at 1.
pub fn validate_events(events: &BTreeMap<TeamNumber, Vec<EventRecord>>) -> StatsResult<()> {
    for (&team, records) in events {
        for record in records {
            validate_event(team, record)?;
        }
    }
    Ok(())
}

pub fn validate_event(team: TeamNumber, record: &EventRecord) -> StatsResult<()> {
    if record.placement == Some(0) {
        return Err(StatsError::InvalidPlacement {
            event_code: record.event_code.clone(),
            team,
        });
    }
    Ok(())
}

pub fn validate_match(record: &MatchRecord) -> StatsResult<()> {
    for (color, alliance) in record.alliances() {
        validate_alliance(&record.key, color, alliance)?;
    }
    check_disjoint_alliances(record)
}

fn validate_alliance(
    key: &MatchKey,
    color: AllianceColor,
    alliance: &AllianceResult,
) -> StatsResult<()> {
    let size = alliance.teams.len();
    if !(MIN_ALLIANCE_SIZE..=MAX_ALLIANCE_SIZE).contains(&size) {
        return Err(StatsError::AllianceSize {
            key: key.clone(),
            alliance: color,
            size,
        });
    }

    let mut teams = HashSet::with_capacity(size);
    for &team in &alliance.teams {
        if !teams.insert(team) {
            return Err(StatsError::DuplicateTeam {
                key: key.clone(),
                alliance: color,
                team,
            });
        }
    }

    if let Some(channel) = Channel::ALL
        .into_iter()
        .find(|&c| !alliance.scores.get(c).is_finite())
    {
        return Err(StatsError::NonFiniteScore {
            key: key.clone(),
            alliance: color,
            channel,
        });
    }

    Ok(())
}

fn check_disjoint_alliances(record: &MatchRecord) -> StatsResult<()> {
    match record.red.teams.iter().find(|&&t| record.blue.contains(t)) {
        Some(&team) => Err(StatsError::TeamOnBothAlliances {
            key: record.key.clone(),
            team,
        }),
        None => Ok(()),
    }
}
