use serde::Deserialize;

use tatami_data::{Expense, Insert, EXPENSE_PAID};

use crate::{datetime, LedgerError};

/// A new expense as submitted by the back office. Every field is
/// optional at the boundary, validation decides what is acceptable.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewExpense {
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
}

/// Validate and append an expense to the ledger. The stored row is
/// dated today and marked paid, a missing description becomes empty.
/// Nothing is written when validation fails.
pub async fn add_expense<DB>(db: &DB, new: NewExpense) -> Result<Expense, LedgerError>
where
    DB: Insert<Expense> + Send + Sync,
{
    let category = new.category.unwrap_or_default();
    if category.trim().is_empty() {
        return Err(LedgerError::validation("category is required"));
    }
    let amount = match new.amount {
        Some(amount) => amount,
        None => return Err(LedgerError::validation("amount is required")),
    };
    if amount < 0.0 {
        return Err(LedgerError::validation("amount must not be negative"));
    }

    // A single insert and nothing else, the ledger stays append only.
    let expense = db
        .insert(Expense {
            category,
            description: new.description.unwrap_or_default(),
            amount,
            date: datetime::today(),
            status: EXPENSE_PAID.to_string(),
            ..Default::default()
        })
        .await?;

    Ok(expense)
}
