use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

pub type ScoreValue = f64;

/// One of the four independent score channels recorded per alliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Auto,
    Tele,
    Endgame,
    Total,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Auto, Channel::Tele, Channel::Endgame, Channel::Total];

    pub fn index(self) -> usize {
        match self {
            Channel::Auto => 0,
            Channel::Tele => 1,
            Channel::Endgame => 2,
            Channel::Total => 3,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Channel::Auto => "auto",
            Channel::Tele => "tele",
            Channel::Endgame => "endgame",
            Channel::Total => "total",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four channel values side by side: raw alliance scores, averages, ratings or deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub auto: ScoreValue,
    pub tele: ScoreValue,
    pub endgame: ScoreValue,
    pub total: ScoreValue,
}

impl ScoreLine {
    pub fn new(auto: ScoreValue, tele: ScoreValue, endgame: ScoreValue, total: ScoreValue) -> Self {
        Self {
            auto,
            tele,
            endgame,
            total,
        }
    }

    pub fn get(&self, channel: Channel) -> ScoreValue {
        match channel {
            Channel::Auto => self.auto,
            Channel::Tele => self.tele,
            Channel::Endgame => self.endgame,
            Channel::Total => self.total,
        }
    }

    pub fn from_channels(mut value: impl FnMut(Channel) -> ScoreValue) -> Self {
        Self::new(
            value(Channel::Auto),
            value(Channel::Tele),
            value(Channel::Endgame),
            value(Channel::Total),
        )
    }

    pub fn to_array(&self) -> [ScoreValue; 4] {
        [self.auto, self.tele, self.endgame, self.total]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Divides every channel by `count`; `None` for an empty sample.
    pub fn mean_of(sum: ScoreLine, count: usize) -> Option<ScoreLine> {
        if count == 0 {
            return None;
        }
        let n = count as ScoreValue;
        Some(ScoreLine::from_channels(|c| sum.get(c) / n))
    }
}

impl Add for ScoreLine {
    type Output = ScoreLine;

    fn add(self, rhs: ScoreLine) -> ScoreLine {
        ScoreLine::from_channels(|c| self.get(c) + rhs.get(c))
    }
}

impl AddAssign for ScoreLine {
    fn add_assign(&mut self, rhs: ScoreLine) {
        *self = *self + rhs;
    }
}

impl Sub for ScoreLine {
    type Output = ScoreLine;

    fn sub(self, rhs: ScoreLine) -> ScoreLine {
        ScoreLine::from_channels(|c| self.get(c) - rhs.get(c))
    }
}
