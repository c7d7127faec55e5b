pub mod settings;

pub use settings::{AppConfig, ServerSettings, StatsSettings};
