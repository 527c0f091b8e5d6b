use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Structured notification payload, stored as a JSON column.
/// The tag names the event that produced the notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationMeta {
    MemberJoined { member_id: u32 },
    PaymentRecorded { payment_id: u32, member_id: u32, amount: f64 },
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NotificationFilter {
    pub id: Option<u32>,
    pub unread_only: bool,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u32,
    pub message: String,
    pub meta: Json<NotificationMeta>,
    pub read: bool,
    pub created_at: NaiveDateTime,
}
