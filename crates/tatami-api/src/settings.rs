use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};

use tatami_data::{Query as QueryOp, Setting, Update};

use crate::error::{required_text, ApiError, Envelope};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PutSetting {
    pub value: Option<String>,
}

/// GET /settings
///
/// Settings are returned as a single key/value object rather than a
/// list of rows.
pub async fn list_settings(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let settings: Vec<Setting> = state.db.query(&()).await?;
    let mut object = Map::new();
    for setting in settings {
        object.insert(setting.key, Value::String(setting.value));
    }
    Ok(Json(Value::Object(object)))
}

/// PUT /settings/:key
pub async fn put_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(put): Json<PutSetting>,
) -> Result<Json<Envelope>, ApiError> {
    let value = required_text(put.value, "value")?;
    let setting = state.db.update(Setting { key, value }).await?;
    Ok(Json(Envelope::ok(format!("setting {} saved", setting.key))))
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
    async fn test_settings_as_object() {
        let (_handle, state) = test_state().await;

        let Json(value) = list_settings(State(state)).await.unwrap();
        assert_eq!(value["club_name"], "Tatami");
        assert_eq!(value["currency"], "EUR");
    }

    #[tokio::test]
    async fn test_put_setting_overwrites() {
        let (_handle, state) = test_state().await;

        let Json(envelope) = put_setting(
            State(state.clone()),
            Path("club_name".to_string()),
            Json(PutSetting {
                value: Some("Tatami Dojo".to_string()),
            }),
        )
        .await
        .unwrap();
        assert!(envelope.success);

        let Json(value) = list_settings(State(state)).await.unwrap();
        assert_eq!(value["club_name"], "Tatami Dojo");
    }

    #[tokio::test]
    async fn test_put_setting_requires_value() {
        let (_handle, state) = test_state().await;

        let err = put_setting(
            State(state),
            Path("club_name".to_string()),
            Json(PutSetting::default()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
