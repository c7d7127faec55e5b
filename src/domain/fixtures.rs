//! Builders shared by the unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::models::{AllianceResult, EventRecord, MatchKey, MatchRecord, MatchType, TeamNumber};
use super::score::ScoreLine;

pub fn line(auto: f64, tele: f64, endgame: f64, total: f64) -> ScoreLine {
    ScoreLine::new(auto, tele, endgame, total)
}

/// Splits `total` 1:2:1 across the phase channels.
pub fn scores(total: f64) -> ScoreLine {
    line(total / 4.0, total / 2.0, total / 4.0, total)
}

pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, day, hour, minute, 0).unwrap()
}

pub fn match_record(
    event: &str,
    match_id: u32,
    red: &[TeamNumber],
    red_scores: ScoreLine,
    blue: &[TeamNumber],
    blue_scores: ScoreLine,
) -> MatchRecord {
    MatchRecord {
        key: MatchKey::new(event, match_id),
        played_at: at(16, 9, 0) + Duration::minutes(i64::from(match_id) * 7),
        match_type: MatchType::Qualification,
        red: AllianceResult {
            teams: red.to_vec(),
            scores: red_scores,
        },
        blue: AllianceResult {
            teams: blue.to_vec(),
            scores: blue_scores,
        },
    }
}

pub fn event(code: &str, placement: Option<u32>, awards: &[&str]) -> EventRecord {
    EventRecord {
        event_code: code.to_string(),
        name: None,
        placement,
        awards: awards.iter().map(|a| a.to_string()).collect(),
    }
}
