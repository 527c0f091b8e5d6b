use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use tatami_data::{Insert, Query as QueryOp, StaffFilter, StaffMember};

use crate::error::{required_text, ApiError};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StaffQuery {
    pub search: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaffMember {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
}

/// GET /staff
pub async fn list_staff(
    State(state): State<AppState>,
    Query(query): Query<StaffQuery>,
) -> Result<Json<Vec<StaffMember>>, ApiError> {
    let filter = StaffFilter {
        name: query.search.filter(|s| !s.is_empty()),
        role: query.role.filter(|s| !s.is_empty()),
        ..Default::default()
    };
    let staff: Vec<StaffMember> = state.db.query(&filter).await?;
    Ok(Json(staff))
}

/// POST /staff
pub async fn create_staff(
    State(state): State<AppState>,
    Json(new): Json<NewStaffMember>,
) -> Result<Json<StaffMember>, ApiError> {
    let first_name = required_text(new.first_name, "firstName")?;
    let last_name = required_text(new.last_name, "lastName")?;
    let role = required_text(new.role, "role")?;

    let member = state
        .db
        .insert(StaffMember {
            first_name,
            last_name,
            role,
            email: new.email.unwrap_or_default(),
            hired_on: tatami_ledger::datetime::today(),
            ..Default::default()
        })
        .await?;
    Ok(Json(member))
}

#[cfg(test)]
mod tests {
    use super::*;

    use tatami_db::Connection;

    async fn test_state() -> (tatami_db::TestHandle, AppState) {
        let (handle, db) = Connection::open_test().await;
        (handle, AppState { db })
    }

    #[tokio::test]
    async fn test_create_and_filter_staff() {
        let (_handle, state) = test_state().await;

        create_staff(
            State(state.clone()),
            Json(NewStaffMember {
                first_name: Some("Marc".to_string()),
                last_name: Some("Dubois".to_string()),
                role: Some("coach".to_string()),
                email: Some("marc@tatami.example".to_string()),
            }),
        )
        .await
        .unwrap();
        create_staff(
            State(state.clone()),
            Json(NewStaffMember {
                first_name: Some("Lea".to_string()),
                last_name: Some("Petit".to_string()),
                role: Some("accueil".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        let Json(coaches) = list_staff(
            State(state),
            Query(StaffQuery {
                role: Some("coach".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(coaches.len(), 1);
        assert_eq!(coaches[0].full_name(), "Marc Dubois");
    }

    #[tokio::test]
    async fn test_create_staff_requires_role() {
        let (_handle, state) = test_state().await;

        let err = create_staff(
            State(state),
            Json(NewStaffMember {
                first_name: Some("Marc".to_string()),
                last_name: Some("Dubois".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
