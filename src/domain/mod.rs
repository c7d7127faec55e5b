pub mod conversion;
pub mod models;
pub mod score;
pub mod snapshot;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use models::*;
pub use score::{Channel, ScoreLine, ScoreValue};
pub use snapshot::CorpusSnapshot;
