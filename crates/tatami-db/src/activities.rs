use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use tatami_data::{
    Activity,
    ActivityFilter,
    Delete,
    Insert,
    Query,
    Retrieve,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Activity> for Connection {
    type Filter = ActivityFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Activity>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                name,
                coach,
                ROUND(monthly_fee, 10) AS monthly_fee,
                schedule
            FROM activities
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND name LIKE ").push_bind(format!("%{}%", name));
        }
        qry.push(" ORDER BY name");

        let activities: Vec<Activity> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(activities)
    }
}

#[async_trait]
impl Retrieve<Activity> for Connection {
    type Key = u32;
    async fn retrieve(&self, activity_id: Self::Key) -> Result<Activity> {
        let filter = ActivityFilter {
            id: Some(activity_id),
            ..Default::default()
        };
        let activity = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(activity)
    }
}

#[async_trait]
impl Insert<Activity> for Connection {
    async fn insert(&self, activity: Activity) -> Result<Activity> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO activities (
                    name,
                    coach,
                    monthly_fee,
                    schedule
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&activity.name)
                .push_bind(&activity.coach)
                .push_bind(activity.monthly_fee)
                .push_bind(&activity.schedule);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Delete<Activity> for Connection {
    async fn delete(&self, activity: Activity) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM activities WHERE id = ")
            .push_bind(activity.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
