use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{error, warn};
use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::domain::{CorpusSnapshot, TeamNumber};
use crate::errors::StatsError;
use crate::loader::FileLoader;
use crate::services::report::ReportService;

pub struct AppState {
    pub loader: FileLoader,
    pub config: AppConfig,
}

impl AppState {
    fn report_service(&self) -> ReportService {
        ReportService::new(self.config.stats.clone())
    }
}

pub async fn get_opr_table(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = match load_snapshot(&state).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    match state.report_service().league_table(&snapshot) {
        Ok(table) => Json(table).into_response(),
        Err(e) => malformed(e),
    }
}

pub async fn get_league_average(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = match load_snapshot(&state).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    match state.report_service().league_average(&snapshot) {
        Ok(average) => Json(average).into_response(),
        Err(e) => malformed(e),
    }
}

pub async fn get_team_report(
    State(state): State<Arc<AppState>>,
    Path(team): Path<TeamNumber>,
) -> Response {
    let snapshot = match load_snapshot(&state).await {
        Ok(snapshot) => snapshot,
        Err(response) => return response,
    };

    match state.report_service().team_report(&snapshot, team) {
        Ok(Some(report)) => Json(report).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("Team {} not found", team)).into_response(),
        Err(e) => malformed(e),
    }
}

/// Each request reads its own snapshot
async fn load_snapshot(state: &AppState) -> Result<CorpusSnapshot, Response> {
    state.loader.snapshot().await.map_err(|e| match e.downcast::<StatsError>() {
        Ok(stats_error) => malformed(stats_error),
        Err(e) => {
            error!("Failed to load snapshot: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Snapshot Load Error").into_response()
        }
    })
}

fn malformed(e: StatsError) -> Response {
    warn!("Rejected snapshot: {}", e);
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
}
