use std::collections::HashMap;

use nalgebra::DMatrix;

use super::least_squares::{self, NormalEquations};
use super::types::{OprTable, TeamContribution};
use crate::config::settings::StatsSettings;
use crate::domain::validation::validate_corpus;
use crate::domain::{Channel, MatchRecord, ScoreLine, TeamNumber};
use crate::errors::StatsResult;

/// Calculates OPR for every team in `matches` by least squares.
///
/// Each alliance is one equation per channel: the sum of its teams' ratings
/// equals the alliance's recorded score. The four channels share the design
/// matrix and are solved together; `total` is its own channel and is not
/// reconciled with the phase ratings.
pub fn calculate_oprs(matches: &[MatchRecord], settings: &StatsSettings) -> StatsResult<OprTable> {
    validate_corpus(matches)?;

    // 1. Map team numbers to dense column indices (0..N)
    let team_numbers = extract_team_numbers(matches);
    if team_numbers.is_empty() {
        return Ok(OprTable::default());
    }

    let team_to_idx: HashMap<TeamNumber, usize> = team_numbers
        .iter()
        .enumerate()
        .map(|(idx, &team)| (team, idx))
        .collect();

    // 2. Count matches per team
    let matches_played = count_matches_per_team(matches);

    // 3. Accumulate AᵀA and Aᵀb alliance by alliance
    let system = build_normal_equations(matches, &team_to_idx);

    // 4. Solve all channels at once
    let solution = least_squares::solve(&system, settings.ridge);

    Ok(build_contributions(&team_numbers, &solution, &matches_played))
}

fn extract_team_numbers(matches: &[MatchRecord]) -> Vec<TeamNumber> {
    let mut teams: Vec<TeamNumber> = matches
        .iter()
        .flat_map(|m| m.red.teams.iter().chain(m.blue.teams.iter()).copied())
        .collect();

    teams.sort_unstable();
    teams.dedup();
    teams
}

fn count_matches_per_team(matches: &[MatchRecord]) -> HashMap<TeamNumber, usize> {
    let mut counts = HashMap::new();
    for record in matches {
        for team in record.red.teams.iter().chain(record.blue.teams.iter()) {
            *counts.entry(*team).or_insert(0) += 1;
        }
    }
    counts
}

fn build_normal_equations(
    matches: &[MatchRecord],
    team_to_idx: &HashMap<TeamNumber, usize>,
) -> NormalEquations {
    let mut system = NormalEquations::zeros(team_to_idx.len(), Channel::ALL.len());

    for record in matches {
        for (_, alliance) in record.alliances() {
            let columns: Vec<usize> = alliance.teams.iter().map(|t| team_to_idx[t]).collect();
            system.add_indicator_row(&columns, &alliance.scores.to_array());
        }
    }

    system
}

fn build_contributions(
    team_numbers: &[TeamNumber],
    solution: &DMatrix<f64>,
    matches_played: &HashMap<TeamNumber, usize>,
) -> OprTable {
    let contributions = team_numbers
        .iter()
        .enumerate()
        .map(|(idx, &team)| {
            let line = ScoreLine::from_channels(|c| solution[(idx, c.index())]);
            let played = matches_played.get(&team).copied().unwrap_or(0);
            TeamContribution::from_line(team, line, played)
        })
        .collect();

    OprTable::from_sorted(contributions)
}
