use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use tatami_data::{Query, Retrieve, Setting, Update};

use crate::{results::QueryError, Connection};

#[async_trait]
impl Query<Setting> for Connection {
    type Filter = ();
    async fn query(&self, _filter: &Self::Filter) -> Result<Vec<Setting>> {
        let mut conn = self.lock().await;
        let settings: Vec<Setting> =
            sqlx::query_as("SELECT key, value FROM settings ORDER BY key")
                .fetch_all(&mut *conn)
                .await?;
        Ok(settings)
    }
}

#[async_trait]
impl Retrieve<Setting> for Connection {
    type Key = String;
    async fn retrieve(&self, key: Self::Key) -> Result<Setting> {
        let mut conn = self.lock().await;
        let setting: Option<Setting> =
            sqlx::query_as("SELECT key, value FROM settings WHERE key = ?")
                .bind(&key)
                .fetch_optional(&mut *conn)
                .await?;
        Ok(setting.ok_or(QueryError::NotFound)?)
    }
}

#[async_trait]
impl Update<Setting> for Connection {
    /// Upsert a setting by key
    async fn update(&self, setting: Setting) -> Result<Setting> {
        {
            let mut conn = self.lock().await;
            let mut qry =
                QueryBuilder::<Sqlite>::new("INSERT INTO settings (key, value) VALUES (");
            qry.separated(", ")
                .push_bind(&setting.key)
                .push_bind(&setting.value);
            qry.push(") ON CONFLICT(key) DO UPDATE SET value = excluded.value")
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(setting.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settings_seeded() {
        let (_handle, db) = Connection::open_test().await;

        let setting: Setting = db.retrieve("club_name".to_string()).await.unwrap();
        assert_eq!(setting.value, "Tatami");

        let settings: Vec<Setting> = db.query(&()).await.unwrap();
        assert!(settings.len() >= 3);
    }

    #[tokio::test]
    async fn test_setting_upsert() {
        let (_handle, db) = Connection::open_test().await;

        let setting = db.update(Setting {
            key: "club_name".to_string(),
            value: "Dojo du Port".to_string(),
        }).await.unwrap();
        assert_eq!(setting.value, "Dojo du Port");

        let setting = db.update(Setting {
            key: "brand_color".to_string(),
            value: "#223344".to_string(),
        }).await.unwrap();
        assert_eq!(setting.key, "brand_color");
        assert_eq!(setting.value, "#223344");
    }

    #[tokio::test]
    async fn test_setting_missing_key() {
        let (_handle, db) = Connection::open_test().await;

        let missing: Result<Setting> = db.retrieve("no_such_key".to_string()).await;
        assert!(missing.is_err());
    }
}
