use anyhow::Result;
use sqlx::types::Json;

use tatami_data::{Insert, Notification, NotificationMeta};

use crate::datetime;

/// Record a notification with the server timestamp.
pub async fn notify<DB>(db: &DB, message: String, meta: NotificationMeta) -> Result<()>
where
    DB: Insert<Notification> + Send + Sync,
{
    db.insert(Notification {
        id: 0,
        message,
        meta: Json(meta),
        read: false,
        created_at: datetime::now(),
    })
    .await?;
    Ok(())
}
