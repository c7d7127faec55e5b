use axum::{Router, routing::get};
use std::sync::Arc;

use crate::api::handlers::{AppState, get_league_average, get_opr_table, get_team_report};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/opr", get(get_opr_table))
        .route("/api/opr/average", get(get_league_average))
        .route("/api/teams/:number", get(get_team_report))
        .with_state(state)
}
