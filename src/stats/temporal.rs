use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, DurationRound, TimeDelta, Timelike, Utc};
use serde::Serialize;

use crate::domain::{ScoreLine, TeamMatch};

/// How matches are grouped before averaging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStrategy {
    /// Same calendar hour (timestamp truncated to the hour)
    CalendarHour,
    /// Same hour of day, regardless of date
    HourOfDay,
    /// Fixed windows of consecutive matches in time order
    Sequential { window: usize },
}

impl FromStr for BucketStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once(':') {
            None if value == "calendar-hour" => Ok(BucketStrategy::CalendarHour),
            None if value == "hour-of-day" => Ok(BucketStrategy::HourOfDay),
            None if value == "sequential" => Ok(BucketStrategy::Sequential { window: 1 }),
            Some(("sequential", window)) => match window.parse::<usize>() {
                Ok(window) if window > 0 => Ok(BucketStrategy::Sequential { window }),
                _ => Err(format!("invalid sequential window '{window}'")),
            },
            _ => Err(format!(
                "unknown bucket strategy '{value}' \
                 (expected calendar-hour, hour-of-day or sequential[:N])"
            )),
        }
    }
}

impl fmt::Display for BucketStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketStrategy::CalendarHour => f.write_str("calendar-hour"),
            BucketStrategy::HourOfDay => f.write_str("hour-of-day"),
            BucketStrategy::Sequential { window } => write!(f, "sequential:{window}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TimeBucket {
    CalendarHour(DateTime<Utc>),
    HourOfDay(u32),
    Window(usize),
}

impl BucketStrategy {
    /// `position` is the match's index in chronological order
    fn bucket_for(&self, played_at: DateTime<Utc>, position: usize) -> TimeBucket {
        match *self {
            BucketStrategy::CalendarHour => TimeBucket::CalendarHour(truncate_to_hour(played_at)),
            BucketStrategy::HourOfDay => TimeBucket::HourOfDay(played_at.hour()),
            BucketStrategy::Sequential { window } => TimeBucket::Window(position / window.max(1)),
        }
    }
}

fn truncate_to_hour(value: DateTime<Utc>) -> DateTime<Utc> {
    value
        .duration_trunc(TimeDelta::hours(1))
        .unwrap_or(value)
}

/// A team match paired with the average of every match in its bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyAverage {
    pub source: TeamMatch,
    pub bucket: TimeBucket,
    pub average: ScoreLine,
    pub sample_size: usize,
}

/// Decorates each match with its bucket's per-channel mean of the team's own
/// alliance scores. One output per input, in time order; ties keep input order.
pub fn attach_bucket_averages(
    matches: &[TeamMatch],
    strategy: BucketStrategy,
) -> Vec<HourlyAverage> {
    let ordered = chronological_order(matches);

    let buckets: Vec<TimeBucket> = ordered
        .iter()
        .enumerate()
        .map(|(position, m)| strategy.bucket_for(m.played_at, position))
        .collect();

    let totals = accumulate_buckets(&ordered, &buckets);

    ordered
        .into_iter()
        .zip(buckets)
        .map(|(source, bucket)| {
            let (sum, count) = totals[&bucket];
            HourlyAverage {
                source: source.clone(),
                bucket,
                average: ScoreLine::mean_of(sum, count).unwrap_or_default(),
                sample_size: count,
            }
        })
        .collect()
}

fn chronological_order(matches: &[TeamMatch]) -> Vec<&TeamMatch> {
    let mut ordered: Vec<&TeamMatch> = matches.iter().collect();
    ordered.sort_by_key(|m| m.played_at);
    ordered
}

fn accumulate_buckets(
    ordered: &[&TeamMatch],
    buckets: &[TimeBucket],
) -> BTreeMap<TimeBucket, (ScoreLine, usize)> {
    let mut totals: BTreeMap<TimeBucket, (ScoreLine, usize)> = BTreeMap::new();
    for (m, bucket) in ordered.iter().zip(buckets) {
        let entry = totals.entry(*bucket).or_default();
        entry.0 += m.own.scores;
        entry.1 += 1;
    }
    totals
}
