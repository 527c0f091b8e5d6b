use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::YearMonth;

/// Status of a booked payment, counted as revenue.
pub const PAYMENT_VALID: &str = "valide";
/// Status of a recorded payment awaiting confirmation.
pub const PAYMENT_PENDING: &str = "en_attente";

/// Payment methods accepted at the front desk.
pub const PAYMENT_METHODS: &[&str] = &["especes", "carte", "cheque", "virement"];

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PaymentFilter {
    pub id: Option<u32>,
    pub member_id: Option<u32>,
    pub status: Option<String>,
    pub month: Option<YearMonth>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: u32,
    pub member_id: u32,
    pub amount: f64,
    pub date: NaiveDate,
    pub method: String,
    pub status: String,
}
