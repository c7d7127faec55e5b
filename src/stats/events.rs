use crate::domain::{EventRecord, ScoreValue, TeamMatch};

/// Mean of the known placements; `None` when no event has one.
pub fn average_placement(events: &[EventRecord]) -> Option<f64> {
    let placements: Vec<f64> = events
        .iter()
        .filter_map(|e| e.placement)
        .map(f64::from)
        .collect();

    if placements.is_empty() {
        return None;
    }
    Some(placements.iter().sum::<f64>() / placements.len() as f64)
}

/// Every award in event order, repeats included
pub fn collect_awards(events: &[EventRecord]) -> Vec<String> {
    events
        .iter()
        .flat_map(|e| e.awards.iter().cloned())
        .collect()
}

pub fn count_wins(matches: &[TeamMatch]) -> usize {
    matches.iter().filter(|m| m.is_win()).count()
}

/// Highest total of the team's own alliance
pub fn high_score(matches: &[TeamMatch]) -> Option<ScoreValue> {
    matches
        .iter()
        .map(TeamMatch::total_points)
        .reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{event, match_record, scores};

    fn played(id: u32, team_score: f64, opp_score: f64) -> TeamMatch {
        match_record("E", id, &[1, 2], scores(team_score), &[3, 4], scores(opp_score))
            .view_for(1)
            .unwrap()
    }

    #[test]
    fn test_average_placement_ignores_unknown() {
        let events = vec![
            event("A", Some(1), &[]),
            event("B", None, &[]),
            event("C", Some(3), &[]),
        ];
        assert_eq!(average_placement(&events), Some(2.0));
    }

    #[test]
    fn test_average_placement_without_data() {
        let events = vec![event("A", None, &[]), event("B", None, &[])];
        assert_eq!(average_placement(&events), None);
        assert_eq!(average_placement(&[]), None);
    }

    #[test]
    fn test_awards_keep_order_and_repeats() {
        let events = vec![
            event("A", Some(4), &["Think Award", "Inspire Award 2nd Place"]),
            event("B", None, &[]),
            event("C", Some(1), &["Think Award"]),
        ];

        assert_eq!(
            collect_awards(&events),
            vec!["Think Award", "Inspire Award 2nd Place", "Think Award"]
        );
    }

    #[test]
    fn test_wins_exclude_ties() {
        let matches = vec![played(1, 40.0, 30.0), played(2, 20.0, 20.0), played(3, 10.0, 50.0)];
        assert_eq!(count_wins(&matches), 1);
    }

    #[test]
    fn test_wins_from_blue_side() {
        let record = match_record("E", 1, &[1, 2], scores(10.0), &[3, 4], scores(30.0));
        let blue_view = record.view_for(4).unwrap();
        assert_eq!(count_wins(&[blue_view]), 1);
    }

    #[test]
    fn test_high_score() {
        let matches = vec![played(1, 40.0, 30.0), played(2, 95.0, 20.0), played(3, 10.0, 50.0)];
        assert_eq!(high_score(&matches), Some(95.0));
        assert_eq!(high_score(&[]), None);
    }
}
