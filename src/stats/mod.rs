pub mod aggregate;
pub mod events;
pub mod match_type;
pub mod temporal;

pub use aggregate::{delta_from_average, league_average};
pub use events::{average_placement, collect_awards, count_wins, high_score};
pub use match_type::{MatchTypeAverage, MatchTypeAverages, average_by_match_type};
pub use temporal::{BucketStrategy, HourlyAverage, TimeBucket, attach_bucket_averages};
