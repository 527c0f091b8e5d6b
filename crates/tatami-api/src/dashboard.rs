use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use tatami_ledger::{dashboard_stats, datetime, DashboardStats};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub month: Option<String>,
}

/// GET /dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardStats>, ApiError> {
    let month = match query.month.filter(|m| !m.is_empty()) {
        Some(text) => text
            .parse()
            .map_err(|_| ApiError::validation(format!("invalid month {}", text)))?,
        None => datetime::this_month(),
    };
    let stats = dashboard_stats(&state.db, month).await?;
    Ok(Json(stats))
}
