use std::collections::BTreeMap;

use ndarray::{Array2, Axis};
use serde::Serialize;

use crate::domain::{MatchType, ScoreLine, TeamMatch};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTypeAverage {
    pub average: ScoreLine,
    pub count: usize,
}

/// Only match types the team actually played have an entry
pub type MatchTypeAverages = BTreeMap<MatchType, MatchTypeAverage>;

/// Mean of the team's own alliance scores per match type.
pub fn average_by_match_type(matches: &[TeamMatch]) -> MatchTypeAverages {
    group_by_type(matches)
        .into_iter()
        .filter_map(|(match_type, rows)| {
            let count = rows.len();
            column_means(rows).map(|average| (match_type, MatchTypeAverage { average, count }))
        })
        .collect()
}

fn group_by_type(matches: &[TeamMatch]) -> BTreeMap<MatchType, Vec<[f64; 4]>> {
    let mut groups: BTreeMap<MatchType, Vec<[f64; 4]>> = BTreeMap::new();
    for m in matches {
        groups
            .entry(m.match_type)
            .or_default()
            .push(m.own.scores.to_array());
    }
    groups
}

/// Per-channel mean of `rows`; `None` when there are no rows
pub(crate) fn column_means(rows: Vec<[f64; 4]>) -> Option<ScoreLine> {
    let table = Array2::from(rows);
    let means = table.mean_axis(Axis(0))?;
    Some(ScoreLine::from_channels(|c| means[c.index()]))
}
