use anyhow::Result;
use serde::Serialize;

use tatami_data::{
    CreditEntry,
    DebitEntry,
    LedgerFilter,
    Member,
    MemberFilter,
    MethodTotal,
    Payment,
    PaymentFilter,
    Query,
    YearMonth,
    EXPENSE_PAID,
    PAYMENT_PENDING,
    PAYMENT_VALID,
};

use crate::datetime;

/// Dashboard numbers for one month, computed from stored rows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub month: YearMonth,
    pub member_count: usize,
    pub active_members: usize,
    pub monthly_revenue: f64,
    pub monthly_expenses: f64,
    pub net_income: f64,
    pub pending_payments: usize,
    pub method_totals: Vec<MethodTotal>,
}

/// Compute the dashboard for a month. Revenue counts validated
/// payments in that month, expenses count paid expenses. Pending
/// payments are counted across all time, they stay pending until
/// someone deals with them.
pub async fn dashboard_stats<DB>(db: &DB, month: YearMonth) -> Result<DashboardStats>
where
    DB: Query<Member, Filter = MemberFilter>
        + Query<Payment, Filter = PaymentFilter>
        + Query<CreditEntry, Filter = LedgerFilter>
        + Query<DebitEntry, Filter = LedgerFilter>
        + Query<MethodTotal, Filter = Option<YearMonth>>
        + Send
        + Sync,
{
    let members: Vec<Member> = db.query(&MemberFilter::default()).await?;
    let today = datetime::today();
    let active_members = members.iter().filter(|m| m.is_active(today)).count();

    let credits: Vec<CreditEntry> = db
        .query(&LedgerFilter {
            status: Some(PAYMENT_VALID.to_string()),
            month: Some(month),
            ..Default::default()
        })
        .await?;
    let monthly_revenue: f64 = credits.iter().map(|c| c.amount).sum();

    let debits: Vec<DebitEntry> = db
        .query(&LedgerFilter {
            status: Some(EXPENSE_PAID.to_string()),
            month: Some(month),
            ..Default::default()
        })
        .await?;
    let monthly_expenses: f64 = debits.iter().map(|d| d.amount).sum();

    let pending: Vec<Payment> = db
        .query(&PaymentFilter {
            status: Some(PAYMENT_PENDING.to_string()),
            ..Default::default()
        })
        .await?;

    let method_totals: Vec<MethodTotal> = db.query(&Some(month)).await?;

    Ok(DashboardStats {
        month,
        member_count: members.len(),
        active_members,
        monthly_revenue,
        monthly_expenses,
        net_income: monthly_revenue - monthly_expenses,
        pending_payments: pending.len(),
        method_totals,
    })
}
