use crate::domain::ScoreLine;
use crate::rating::{OprTable, TeamContribution};

use super::match_type::column_means;

/// League-wide mean OPR per channel over teams with finite ratings.
/// `None` for an empty league.
pub fn league_average(table: &OprTable) -> Option<ScoreLine> {
    let rows: Vec<[f64; 4]> = table
        .iter()
        .map(|c| c.as_line())
        .filter(ScoreLine::is_finite)
        .map(|line| line.to_array())
        .collect();

    column_means(rows)
}

/// Signed per-channel difference between a team and the league mean
pub fn delta_from_average(team: &TeamContribution, average: &ScoreLine) -> ScoreLine {
    team.as_line() - *average
}
