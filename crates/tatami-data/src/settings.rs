use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A club level key/value setting.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}
