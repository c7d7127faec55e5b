use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use super::conversion::{convert_event, convert_match, parse_timestamp};
use super::models::{EventRecord, MatchRecord, SnapshotResponse, TeamMatch, TeamNumber};
use super::validation::{validate_corpus, validate_events};
use crate::errors::StatsResult;

/// Immutable, validated view of the match corpus at one point in time.
///
/// Every statistic is computed from a snapshot handed in by the caller, so two
/// results computed from the same snapshot are always consistent with each other.
/// Matches are kept in chronological order; equal timestamps keep their input order.
#[derive(Debug, Clone, Default)]
pub struct CorpusSnapshot {
    fetched_at: Option<DateTime<Utc>>,
    matches: Vec<MatchRecord>,
    events: BTreeMap<TeamNumber, Vec<EventRecord>>,
}

impl CorpusSnapshot {
    pub fn new(
        mut matches: Vec<MatchRecord>,
        events: BTreeMap<TeamNumber, Vec<EventRecord>>,
    ) -> StatsResult<Self> {
        validate_corpus(&matches)?;
        validate_events(&events)?;
        matches.sort_by_key(|m| m.played_at);

        Ok(Self {
            fetched_at: None,
            matches,
            events,
        })
    }

    pub fn from_response(response: SnapshotResponse) -> StatsResult<Self> {
        let matches = response
            .matches
            .iter()
            .map(convert_match)
            .collect::<StatsResult<Vec<_>>>()?;

        let mut events: BTreeMap<TeamNumber, Vec<EventRecord>> = BTreeMap::new();
        for raw in &response.events {
            events.entry(raw.team).or_default().push(convert_event(raw)?);
        }

        let mut snapshot = Self::new(matches, events)?;
        snapshot.fetched_at = response.fetched_at.as_deref().and_then(parse_timestamp);
        Ok(snapshot)
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.events.is_empty()
    }

    /// Every team that played a match or attended an event
    pub fn teams(&self) -> BTreeSet<TeamNumber> {
        self.matches
            .iter()
            .flat_map(|m| m.red.teams.iter().chain(m.blue.teams.iter()).copied())
            .chain(self.events.keys().copied())
            .collect()
    }

    pub fn knows_team(&self, team: TeamNumber) -> bool {
        self.events.contains_key(&team) || self.matches.iter().any(|m| m.involves(team))
    }

    pub fn team_match_records(&self, team: TeamNumber) -> Vec<MatchRecord> {
        self.matches
            .iter()
            .filter(|m| m.involves(team))
            .cloned()
            .collect()
    }

    /// The team's matches from its own alliance's point of view, in time order
    pub fn team_matches(&self, team: TeamNumber) -> Vec<TeamMatch> {
        self.matches
            .iter()
            .filter_map(|m| m.view_for(team))
            .collect()
    }

    pub fn team_events(&self, team: TeamNumber) -> &[EventRecord] {
        self.events.get(&team).map(Vec::as_slice).unwrap_or(&[])
    }
}
