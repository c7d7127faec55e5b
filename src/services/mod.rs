pub mod report;
pub mod server;

pub use report::{ReportService, TeamReport};
pub use server::ServerService;
