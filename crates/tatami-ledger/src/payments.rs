use chrono::NaiveDate;
use serde::Deserialize;

use tatami_data::{
    Insert,
    Member,
    Notification,
    NotificationMeta,
    Payment,
    Retrieve,
    PAYMENT_METHODS,
    PAYMENT_PENDING,
    PAYMENT_VALID,
};

use crate::{datetime, notify::notify, LedgerError};

/// A new payment as submitted by the front desk.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub member_id: Option<u32>,
    pub amount: Option<f64>,
    pub method: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Record a member payment on the credit side of the ledger and leave
/// a notification for the dashboard. The member must exist, the
/// method and status must be known values when given.
pub async fn record_payment<DB>(db: &DB, new: NewPayment) -> Result<Payment, LedgerError>
where
    DB: Insert<Payment>
        + Insert<Notification>
        + Retrieve<Member, Key = u32>
        + Send
        + Sync,
{
    let member_id = match new.member_id {
        Some(member_id) => member_id,
        None => return Err(LedgerError::validation("memberId is required")),
    };
    let amount = match new.amount {
        Some(amount) => amount,
        None => return Err(LedgerError::validation("amount is required")),
    };
    if amount < 0.0 {
        return Err(LedgerError::validation("amount must not be negative"));
    }

    let method = new.method.unwrap_or_else(|| PAYMENT_METHODS[0].to_string());
    if !PAYMENT_METHODS.contains(&method.as_str()) {
        return Err(LedgerError::validation(format!(
            "unknown payment method {}",
            method
        )));
    }
    let status = new.status.unwrap_or_else(|| PAYMENT_VALID.to_string());
    if status != PAYMENT_VALID && status != PAYMENT_PENDING {
        return Err(LedgerError::validation(format!(
            "unknown payment status {}",
            status
        )));
    }

    let member: Member = db.retrieve(member_id).await?;

    let payment = db
        .insert(Payment {
            member_id: member.id,
            amount,
            date: new.date.unwrap_or_else(datetime::today),
            method,
            status,
            ..Default::default()
        })
        .await?;

    notify(
        db,
        format!(
            "Payment of {:.2} received from {}",
            payment.amount,
            member.full_name()
        ),
        NotificationMeta::PaymentRecorded {
            payment_id: payment.id,
            member_id: member.id,
            amount: payment.amount,
        },
    )
    .await?;

    Ok(payment)
}
