use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use tatami_data::LedgerFilter;
use tatami_ledger::{query_ledger, LedgerReport, NewExpense};

use crate::error::{ApiError, Envelope};
use crate::AppState;

/// Raw ledger query string. `all` and empty values mean no constraint.
#[derive(Debug, Default, Deserialize)]
pub struct LedgerQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub month: Option<String>,
    pub search: Option<String>,
}

impl LedgerQuery {
    pub fn into_filter(self) -> Result<LedgerFilter, ApiError> {
        let mut filter = LedgerFilter::default();
        if let Some(kind) = self.kind.as_deref().filter(|k| !k.is_empty()) {
            filter.kind = kind
                .parse()
                .map_err(|err| ApiError::validation(format!("{}", err)))?;
        }
        filter.status = self
            .status
            .filter(|status| !status.is_empty() && status != "all");
        if let Some(month) = self.month.as_deref().filter(|m| !m.is_empty()) {
            filter.month = Some(
                month
                    .parse()
                    .map_err(|err| ApiError::validation(format!("{}", err)))?,
            );
        }
        filter.search = self.search.filter(|search| !search.is_empty());
        Ok(filter)
    }
}

/// GET /ledger
pub async fn get_ledger(
    State(state): State<AppState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<LedgerReport>, ApiError> {
    let filter = query.into_filter()?;
    let report = query_ledger(&state.db, &filter).await?;
    Ok(Json(report))
}

/// POST /expenses
pub async fn add_expense(
    State(state): State<AppState>,
    Json(new): Json<NewExpense>,
) -> Result<Json<Envelope>, ApiError> {
    let expense = tatami_ledger::add_expense(&state.db, new).await?;
    Ok(Envelope::ok(format!("expense #{} recorded", expense.id)))
}
