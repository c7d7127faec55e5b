use log::info;
use serde::Serialize;

use crate::config::settings::StatsSettings;
use crate::domain::{CorpusSnapshot, EventRecord, ScoreLine, ScoreValue, TeamNumber};
use crate::errors::StatsResult;
use crate::rating::{self, OprTable, TeamContribution};
use crate::stats::{self, HourlyAverage, MatchTypeAverages};

/// Everything the dashboard shows for one team
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamReport {
    pub team_number: TeamNumber,
    pub opr: Option<TeamContribution>,
    pub league_average: Option<ScoreLine>,
    pub opr_delta: Option<ScoreLine>,
    pub average_place: Option<f64>,
    pub achievements: Vec<String>,
    pub wins: usize,
    pub matches_played: usize,
    pub high_score: Option<ScoreValue>,
    pub match_type_averages: MatchTypeAverages,
    pub hourly_averages: Vec<HourlyAverage>,
    pub events: Vec<EventRecord>,
}

pub struct ReportService {
    settings: StatsSettings,
}

impl ReportService {
    pub fn new(settings: StatsSettings) -> Self {
        Self { settings }
    }

    pub fn league_table(&self, snapshot: &CorpusSnapshot) -> StatsResult<OprTable> {
        let table = rating::calculate_oprs(snapshot.matches(), &self.settings)?;
        info!(
            "Calculated OPR for {} teams from {} matches (ridge {})",
            table.len(),
            snapshot.matches().len(),
            self.settings.ridge
        );
        Ok(table)
    }

    pub fn league_average(&self, snapshot: &CorpusSnapshot) -> StatsResult<Option<ScoreLine>> {
        let table = self.league_table(snapshot)?;
        Ok(stats::league_average(&table))
    }

    /// `None` if the snapshot knows nothing about the team
    pub fn team_report(
        &self,
        snapshot: &CorpusSnapshot,
        team: TeamNumber,
    ) -> StatsResult<Option<TeamReport>> {
        if !snapshot.knows_team(team) {
            info!("Team {} not found in snapshot", team);
            return Ok(None);
        }

        let table = self.league_table(snapshot)?;
        let league_average = stats::league_average(&table);
        let opr = table.get(team).cloned();
        let opr_delta = opr
            .as_ref()
            .zip(league_average.as_ref())
            .map(|(own, average)| stats::delta_from_average(own, average));

        let matches = snapshot.team_matches(team);
        let events = snapshot.team_events(team).to_vec();

        let report = TeamReport {
            team_number: team,
            opr,
            league_average,
            opr_delta,
            average_place: stats::average_placement(&events),
            achievements: stats::collect_awards(&events),
            wins: stats::count_wins(&matches),
            matches_played: matches.len(),
            high_score: stats::high_score(&matches),
            match_type_averages: stats::average_by_match_type(&matches),
            hourly_averages: stats::attach_bucket_averages(&matches, self.settings.bucket),
            events,
        };

        info!(
            "Built report for team {}: {} matches, {} wins, {} events",
            team,
            report.matches_played,
            report.wins,
            report.events.len()
        );
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::domain::fixtures::{event, line, match_record, scores};
    use crate::domain::MatchType;

    fn snapshot() -> CorpusSnapshot {
        let mut playoff = match_record("E", 9, &[1, 3], scores(90.0), &[2, 4], scores(95.0));
        playoff.match_type = MatchType::Elimination;

        let matches = vec![
            match_record("E", 1, &[1, 2], line(10.0, 30.0, 10.0, 55.0), &[3, 4], scores(40.0)),
            match_record("E", 2, &[1, 4], scores(60.0), &[2, 3], scores(60.0)),
            playoff,
        ];
        let events = BTreeMap::from([
            (1, vec![event("E", Some(4), &["Connect Award"]), event("F", None, &[])]),
            (8, vec![event("F", Some(20), &[])]),
        ]);
        CorpusSnapshot::new(matches, events).unwrap()
    }

    fn service() -> ReportService {
        ReportService::new(StatsSettings::default())
    }

    #[test]
    fn test_full_report_for_active_team() {
        let report = service().team_report(&snapshot(), 1).unwrap().unwrap();

        assert_eq!(report.team_number, 1);
        assert_eq!(report.matches_played, 3);
        assert_eq!(report.wins, 1);
        assert_eq!(report.high_score, Some(90.0));
        assert_eq!(report.average_place, Some(4.0));
        assert_eq!(report.achievements, vec!["Connect Award"]);
        assert_eq!(report.hourly_averages.len(), 3);
        assert_eq!(report.match_type_averages[&MatchType::Qualification].count, 2);
        assert_eq!(report.match_type_averages[&MatchType::Elimination].count, 1);
        assert!(report.opr.is_some());
        assert!(report.opr_delta.unwrap().is_finite());
    }

    #[test]
    fn test_team_with_events_only_has_no_match_statistics() {
        let report = service().team_report(&snapshot(), 8).unwrap().unwrap();

        assert!(report.opr.is_none());
        assert!(report.opr_delta.is_none());
        assert!(report.league_average.is_some());
        assert_eq!(report.high_score, None);
        assert!(report.match_type_averages.is_empty());
        assert!(report.hourly_averages.is_empty());
        assert_eq!(report.average_place, Some(20.0));
    }

    #[test]
    fn test_unknown_team() {
        assert!(service().team_report(&snapshot(), 404).unwrap().is_none());
    }

    #[test]
    fn test_empty_snapshot_has_no_league_average() {
        let empty = CorpusSnapshot::default();
        assert_eq!(service().league_average(&empty).unwrap(), None);
    }

    #[test]
    fn test_report_serializes_with_dashboard_field_names() {
        let report = service().team_report(&snapshot(), 1).unwrap().unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["opr"]["autoOPR"].is_number());
        assert!(json["averagePlace"].is_number());
        assert!(json["matchTypeAverages"]["qualification"]["average"]["total"].is_number());
        assert!(json["matchTypeAverages"].get("other").is_none());
    }
}
