use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use tatami_data::{Activity, ActivityFilter, Insert, Query as QueryOp};

use crate::error::{required, required_text, ApiError};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub name: Option<String>,
    pub coach: Option<String>,
    pub monthly_fee: Option<f64>,
    pub schedule: Option<String>,
}

/// GET /activities
pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let filter = ActivityFilter {
        name: query.search.filter(|s| !s.is_empty()),
        ..Default::default()
    };
    let activities: Vec<Activity> = state.db.query(&filter).await?;
    Ok(Json(activities))
}

/// POST /activities
pub async fn create_activity(
    State(state): State<AppState>,
    Json(new): Json<NewActivity>,
) -> Result<Json<Activity>, ApiError> {
    let name = required_text(new.name, "name")?;
    let monthly_fee = required(new.monthly_fee, "monthlyFee")?;
    if monthly_fee < 0.0 {
        return Err(ApiError::validation("monthlyFee must not be negative"));
    }

    // The activity name doubles as its identifier on member rows
    let existing: Vec<Activity> = state
        .db
        .query(&ActivityFilter {
            name: Some(name.clone()),
            ..Default::default()
        })
        .await?;
    if existing.iter().any(|a| a.name == name) {
        return Err(ApiError::validation(format!(
            "activity {} already exists",
            name
        )));
    }

    let activity = state
        .db
        .insert(Activity {
            name,
            coach: new.coach.unwrap_or_default(),
            monthly_fee,
            schedule: new.schedule.unwrap_or_default(),
            ..Default::default()
        })
        .await?;
    Ok(Json(activity))
}
