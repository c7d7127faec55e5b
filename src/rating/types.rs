use serde::{Deserialize, Serialize};

use crate::domain::{Channel, ScoreLine, ScoreValue, TeamNumber};

/// Estimated average per-match contribution of one team, per score channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamContribution {
    pub team: TeamNumber,
    #[serde(rename = "autoOPR")]
    pub auto_opr: ScoreValue,
    #[serde(rename = "teleOPR")]
    pub tele_opr: ScoreValue,
    #[serde(rename = "endgameOPR")]
    pub endgame_opr: ScoreValue,
    #[serde(rename = "overallOPR")]
    pub overall_opr: ScoreValue,
    #[serde(rename = "matchesPlayed")]
    pub matches_played: usize,
}

impl TeamContribution {
    pub fn from_line(team: TeamNumber, line: ScoreLine, matches_played: usize) -> Self {
        Self {
            team,
            auto_opr: line.auto,
            tele_opr: line.tele,
            endgame_opr: line.endgame,
            overall_opr: line.total,
            matches_played,
        }
    }

    pub fn as_line(&self) -> ScoreLine {
        ScoreLine::new(self.auto_opr, self.tele_opr, self.endgame_opr, self.overall_opr)
    }

    pub fn get(&self, channel: Channel) -> ScoreValue {
        self.as_line().get(channel)
    }
}

/// OPR results for every team with at least one match, sorted by team number
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OprTable {
    contributions: Vec<TeamContribution>,
}

impl OprTable {
    pub(crate) fn from_sorted(contributions: Vec<TeamContribution>) -> Self {
        Self { contributions }
    }

    pub fn get(&self, team: TeamNumber) -> Option<&TeamContribution> {
        self.contributions
            .binary_search_by_key(&team, |c| c.team)
            .ok()
            .map(|idx| &self.contributions[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamContribution> {
        self.contributions.iter()
    }

    pub fn as_slice(&self) -> &[TeamContribution] {
        &self.contributions
    }

    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}
