use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Payment, PaymentFilter, Query};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub activity: Option<String>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub activity: String,
    pub membership_start: NaiveDate,
    pub membership_end: Option<NaiveDate>,
}

impl Member {

    /// Name as shown on ledger entries and notifications
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Get payments recorded for this member
    pub async fn get_payments<DB>(
        &self,
        db: &DB,
    ) -> Result<Vec<Payment>>
    where
         DB: Query<Payment, Filter=PaymentFilter>,
    {
        let payments = db.query(&PaymentFilter{
            member_id: Some(self.id),
            ..Default::default()
        }).await?;
        Ok(payments)
    }

    // Check if the membership covers the given date
    pub fn is_active(&self, date: NaiveDate) -> bool {
        if date < self.membership_start {
            return false;
        }
        if let Some(end) = self.membership_end {
            if date > end {
                return false;
            }
        }
        true
    }
}
