use anyhow::Result;
use serde::Serialize;
use tracing::warn;

use tatami_data::{
    CreditEntry,
    DebitEntry,
    EntryKind,
    ExpenseCategory,
    LedgerEntry,
    LedgerFilter,
    Query,
};

/// Totals over the filtered entries. Revenue sums the credit side,
/// expenses the debit side, regardless of how the rows interleave.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_income: f64,
}

/// Effective filter values echoed back to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterEcho {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub month: String,
    pub search: String,
}

impl From<&LedgerFilter> for FilterEcho {
    fn from(filter: &LedgerFilter) -> Self {
        FilterEcho {
            kind: filter.kind.as_str().to_string(),
            status: filter.status.clone().unwrap_or_else(|| "all".to_string()),
            month: filter.month.map(|m| m.to_string()).unwrap_or_default(),
            search: filter.search.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerMeta {
    pub expense_categories: Vec<String>,
    pub filters: FilterEcho,
}

/// The unified ledger: ordered entries, totals and client metadata.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerReport {
    pub transactions: Vec<LedgerEntry>,
    pub summary: LedgerSummary,
    pub meta: LedgerMeta,
}

/// Build the unified ledger for a filter. Each side is fetched on
/// its own, tagged, merged and ordered newest first. The kind filter
/// decides up front which sides are fetched at all, so a status that
/// only exists on the other side simply yields nothing.
pub async fn query_ledger<DB>(db: &DB, filter: &LedgerFilter) -> Result<LedgerReport>
where
    DB: Query<CreditEntry, Filter = LedgerFilter>
        + Query<DebitEntry, Filter = LedgerFilter>
        + Query<ExpenseCategory, Filter = ()>
        + Send
        + Sync,
{
    let mut entries: Vec<LedgerEntry> = Vec::new();

    if filter.kind.includes(EntryKind::Credit) {
        let credits: Vec<CreditEntry> = db.query(filter).await?;
        entries.extend(credits.into_iter().map(LedgerEntry::from));
    }
    if filter.kind.includes(EntryKind::Debit) {
        let debits: Vec<DebitEntry> = db.query(filter).await?;
        entries.extend(debits.into_iter().map(LedgerEntry::from));
    }

    // Each side arrives date descending. The merge sort is stable,
    // so entries on the same date keep credits ahead of debits.
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let summary = summarize(&entries);

    // The category list feeds the client filter dropdown. If the
    // lookup fails the report still goes out, with an empty list.
    let categories: Vec<ExpenseCategory> = match db.query(&()).await {
        Ok(categories) => categories,
        Err(err) => {
            warn!("expense category lookup failed: {}", err);
            Vec::new()
        }
    };

    Ok(LedgerReport {
        transactions: entries,
        summary,
        meta: LedgerMeta {
            expense_categories: categories.into_iter().map(|c| c.category).collect(),
            filters: FilterEcho::from(filter),
        },
    })
}

fn summarize(entries: &[LedgerEntry]) -> LedgerSummary {
    let mut summary = LedgerSummary::default();
    for entry in entries {
        match entry.kind {
            EntryKind::Credit => summary.total_revenue += entry.amount,
            EntryKind::Debit => summary.total_expenses += entry.amount,
        }
    }
    summary.net_income = summary.total_revenue - summary.total_expenses;
    summary
}
