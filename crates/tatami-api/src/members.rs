use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use tatami_data::{
    Delete,
    Insert,
    Member,
    MemberFilter,
    NotificationMeta,
    Query as QueryOp,
    Retrieve,
};
use tatami_ledger::{datetime, notify};

use crate::error::{required_text, ApiError, Envelope};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MemberQuery {
    pub search: Option<String>,
    pub activity: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub activity: Option<String>,
    pub membership_start: Option<NaiveDate>,
}

/// GET /members
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<MemberQuery>,
) -> Result<Json<Vec<Member>>, ApiError> {
    let filter = MemberFilter {
        name: query.search.filter(|s| !s.is_empty()),
        activity: query.activity.filter(|a| !a.is_empty()),
        ..Default::default()
    };
    let members: Vec<Member> = state.db.query(&filter).await?;
    Ok(Json(members))
}

/// GET /members/:id
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Member>, ApiError> {
    let member: Member = state.db.retrieve(id).await?;
    Ok(Json(member))
}

/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    Json(new): Json<NewMember>,
) -> Result<Json<Member>, ApiError> {
    let first_name = required_text(new.first_name, "firstName")?;
    let last_name = required_text(new.last_name, "lastName")?;
    let email = new.email.unwrap_or_default();

    // Refuse a second enrolment with the same email
    if !email.is_empty() {
        let existing: Vec<Member> = state
            .db
            .query(&MemberFilter {
                email: Some(email.clone()),
                ..Default::default()
            })
            .await?;
        if !existing.is_empty() {
            return Err(ApiError::validation(format!(
                "a member with email {} already exists",
                email
            )));
        }
    }

    let member = state
        .db
        .insert(Member {
            first_name,
            last_name,
            email,
            phone: new.phone.unwrap_or_default(),
            activity: new.activity.unwrap_or_default(),
            membership_start: new.membership_start.unwrap_or_else(datetime::today),
            ..Default::default()
        })
        .await?;

    notify(
        &state.db,
        format!("New member enrolled: {}", member.full_name()),
        NotificationMeta::MemberJoined {
            member_id: member.id,
        },
    )
    .await?;

    Ok(Json(member))
}

/// DELETE /members/:id
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Envelope>, ApiError> {
    let member: Member = state.db.retrieve(id).await?;
    state.db.delete(member).await?;
    Ok(Envelope::ok(format!("member #{} deleted", id)))
}
