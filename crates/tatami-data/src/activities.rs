use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ActivityFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
}

/// A course or facility members can subscribe to.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u32,
    pub name: String,
    pub coach: String,
    pub monthly_fee: f64,
    pub schedule: String,
}
