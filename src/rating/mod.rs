pub mod least_squares;
pub mod opr;
pub mod types;

pub use opr::calculate_oprs;
pub use types::{OprTable, TeamContribution};
