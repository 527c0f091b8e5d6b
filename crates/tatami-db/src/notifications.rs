use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use tatami_data::{
    Insert,
    Notification,
    NotificationFilter,
    Query,
    Retrieve,
    Update,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Notification> for Connection {
    type Filter = NotificationFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Notification>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                message,
                meta,
                read,
                created_at
            FROM notifications
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if filter.unread_only {
            qry.push(" AND read = 0");
        }
        qry.push(" ORDER BY created_at DESC, id DESC");

        let notifications: Vec<Notification> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(notifications)
    }
}

#[async_trait]
impl Retrieve<Notification> for Connection {
    type Key = u32;
    async fn retrieve(&self, notification_id: Self::Key) -> Result<Notification> {
        let filter = NotificationFilter {
            id: Some(notification_id),
            ..Default::default()
        };
        let notification = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(notification)
    }
}

#[async_trait]
impl Insert<Notification> for Connection {
    async fn insert(&self, notification: Notification) -> Result<Notification> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO notifications (
                    message,
                    meta,
                    read,
                    created_at
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&notification.message)
                .push_bind(&notification.meta)
                .push_bind(notification.read)
                .push_bind(notification.created_at);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Notification> for Connection {
    /// Update the mutable parts of a notification. The stored
    /// meta payload stays as written at insert time.
    async fn update(&self, notification: Notification) -> Result<Notification> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE notifications SET")
                .push(" message = ")
                .push_bind(&notification.message)
                .push(", read = ")
                .push_bind(notification.read)
                .push(" WHERE id = ")
                .push_bind(notification.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(notification.id).await
    }
}
