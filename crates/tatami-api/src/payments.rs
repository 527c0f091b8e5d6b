use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use tatami_data::{Payment, PaymentFilter, Query as QueryOp};
use tatami_ledger::{record_payment, NewPayment};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuery {
    pub member_id: Option<u32>,
    pub status: Option<String>,
    pub month: Option<String>,
}

/// GET /payments
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentQuery>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let mut filter = PaymentFilter {
        member_id: query.member_id,
        status: query.status.filter(|s| !s.is_empty() && s != "all"),
        ..Default::default()
    };
    if let Some(month) = query.month.as_deref().filter(|m| !m.is_empty()) {
        filter.month = Some(
            month
                .parse()
                .map_err(|err| ApiError::validation(format!("{}", err)))?,
        );
    }
    let payments: Vec<Payment> = state.db.query(&filter).await?;
    Ok(Json(payments))
}

/// POST /payments
pub async fn create_payment(
    State(state): State<AppState>,
    Json(new): Json<NewPayment>,
) -> Result<Json<Payment>, ApiError> {
    let payment = record_payment(&state.db, new).await?;
    Ok(Json(payment))
}
