use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::YearMonth;

/// Status of an expense that has been paid out.
pub const EXPENSE_PAID: &str = "paye";
/// Status of a budgeted expense not yet paid.
pub const EXPENSE_PLANNED: &str = "prevu";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub id: Option<u32>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub month: Option<YearMonth>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Expense {
    pub id: u32,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: String,
}
