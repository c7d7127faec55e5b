use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::models::{
    AllianceColor, AllianceResponse, AllianceResult, EventRecord, EventResponse, MatchKey,
    MatchRecord, MatchResponse, MatchType,
};
use crate::domain::score::{Channel, ScoreLine};
use crate::domain::validation::validate_event;
use crate::errors::{StatsError, StatsResult};

pub fn convert_match(response: &MatchResponse) -> StatsResult<MatchRecord> {
    let key = MatchKey::new(response.event_code.clone(), response.match_id);
    let played_at = parse_timestamp(&response.timestamp).ok_or_else(|| {
        StatsError::InvalidTimestamp {
            key: key.clone(),
            value: response.timestamp.clone(),
        }
    })?;

    let red = convert_alliance(&key, AllianceColor::Red, &response.red)?;
    let blue = convert_alliance(&key, AllianceColor::Blue, &response.blue)?;

    Ok(MatchRecord {
        key,
        played_at,
        match_type: response.match_type.unwrap_or(MatchType::Other),
        red,
        blue,
    })
}

fn convert_alliance(
    key: &MatchKey,
    color: AllianceColor,
    response: &AllianceResponse,
) -> StatsResult<AllianceResult> {
    let mut channels = [0.0; 4];
    for channel in Channel::ALL {
        channels[channel.index()] = required_score(key, color, channel, response)?;
    }

    Ok(AllianceResult {
        teams: response.teams.clone(),
        scores: ScoreLine::from_channels(|c| channels[c.index()]),
    })
}

fn required_score(
    key: &MatchKey,
    color: AllianceColor,
    channel: Channel,
    response: &AllianceResponse,
) -> StatsResult<f64> {
    let value = match channel {
        Channel::Auto => response.auto_points,
        Channel::Tele => response.tele_points,
        Channel::Endgame => response.endgame_points,
        Channel::Total => response.total_points,
    };

    value.ok_or_else(|| StatsError::MissingScore {
        key: key.clone(),
        alliance: color,
        channel,
    })
}

pub fn convert_event(response: &EventResponse) -> StatsResult<EventRecord> {
    let record = EventRecord {
        event_code: response.event_code.clone(),
        name: response.name.clone(),
        placement: response.placement,
        awards: response.awards.clone(),
    };
    validate_event(response.team, &record)?;
    Ok(record)
}

/// Accepts RFC 3339 and naive ISO timestamps; naive ones are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn alliance(teams: &[u32]) -> AllianceResponse {
        AllianceResponse {
            teams: teams.to_vec(),
            auto_points: Some(10.0),
            tele_points: Some(20.0),
            endgame_points: Some(5.0),
            total_points: Some(40.0),
        }
    }

    fn response() -> MatchResponse {
        MatchResponse {
            event_code: "USCAFFQ".to_string(),
            match_id: 7,
            match_type: Some(MatchType::Qualification),
            timestamp: "2024-11-16T10:42:00Z".to_string(),
            red: alliance(&[1, 2]),
            blue: alliance(&[3, 4]),
        }
    }

    #[test]
    fn test_convert_complete_match() {
        let record = convert_match(&response()).unwrap();

        assert_eq!(record.key, MatchKey::new("USCAFFQ", 7));
        assert_eq!(record.played_at.hour(), 10);
        assert_eq!(record.red.teams, vec![1, 2]);
        assert_eq!(record.blue.scores.total, 40.0);
    }

    #[test]
    fn test_missing_score_names_match_and_channel() {
        let mut raw = response();
        raw.blue.endgame_points = None;

        let err = convert_match(&raw).unwrap_err();
        assert_eq!(
            err,
            StatsError::MissingScore {
                key: MatchKey::new("USCAFFQ", 7),
                alliance: AllianceColor::Blue,
                channel: Channel::Endgame,
            }
        );
        assert!(err.to_string().contains("USCAFFQ#7"));
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let mut raw = response();
        raw.timestamp = "yesterday".to_string();

        assert!(matches!(
            convert_match(&raw),
            Err(StatsError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        let parsed = parse_timestamp("2024-11-16T10:42:00").unwrap();
        assert_eq!(parsed, parse_timestamp("2024-11-16T10:42:00+00:00").unwrap());
    }

    #[test]
    fn test_unknown_match_type_string_maps_to_other() {
        let json = r#"{
            "eventCode": "X", "matchId": 1, "matchType": "practice",
            "timestamp": "2024-01-01T00:00:00Z",
            "red": {"teams": [1, 2], "autoPoints": 0, "telePoints": 0, "endgamePoints": 0, "totalPoints": 0},
            "blue": {"teams": [3, 4], "autoPoints": 0, "telePoints": 0, "endgamePoints": 0, "totalPoints": 0}
        }"#;
        let raw: MatchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(raw.match_type, Some(MatchType::Other));

        let playoff: MatchType = serde_json::from_str(r#""playoff""#).unwrap();
        assert_eq!(playoff, MatchType::Elimination);
    }

    #[test]
    fn test_zero_placement_is_rejected() {
        let event = EventResponse {
            team: 11115,
            event_code: "USCAFFQ".to_string(),
            name: None,
            placement: Some(0),
            awards: vec![],
        };

        assert!(matches!(
            convert_event(&event),
            Err(StatsError::InvalidPlacement { team: 11115, .. })
        ));
    }
}
