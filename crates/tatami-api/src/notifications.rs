use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use tatami_data::{Notification, NotificationFilter, Query as QueryOp, Retrieve, Update};

use crate::error::{ApiError, Envelope};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    pub unread: Option<bool>,
}

/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let filter = NotificationFilter {
        unread_only: query.unread.unwrap_or(false),
        ..Default::default()
    };
    let notifications: Vec<Notification> = state.db.query(&filter).await?;
    Ok(Json(notifications))
}

/// POST /notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Envelope>, ApiError> {
    let mut notification: Notification = state.db.retrieve(id).await?;
    notification.read = true;
    state.db.update(notification).await?;
    Ok(Json(Envelope::ok("notification marked as read")))
}
