use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use tatami_data::{
    Insert,
    Query,
    Retrieve,
    Payment,
    PaymentFilter,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Payment> for Connection {
    type Filter = PaymentFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Payment>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                member_id,
                ROUND(amount, 10) AS amount,
                date,
                method,
                status
            FROM payments
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id {
            qry.push(" AND member_id = ").push_bind(member_id);
        }
        if let Some(status) = filter.status.clone() {
            qry.push(" AND status = ").push_bind(status);
        }
        if let Some(month) = filter.month {
            qry.push(" AND strftime('%Y-%m', date) = ")
                .push_bind(month.to_string());
        }
        qry.push(" ORDER BY date DESC, id DESC");

        let payments: Vec<Payment> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(payments)
    }
}

#[async_trait]
impl Retrieve<Payment> for Connection {
    type Key = u32;
    async fn retrieve(&self, payment_id: Self::Key) -> Result<Payment> {
        let filter = PaymentFilter {
            id: Some(payment_id),
            ..Default::default()
        };
        let payment = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(payment)
    }
}

// Payments are append only, ledger rows are never rewritten.
#[async_trait]
impl Insert<Payment> for Connection {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO payments (
                    member_id,
                    amount,
                    date,
                    method,
                    status
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(payment.member_id)
                .push_bind(payment.amount)
                .push_bind(payment.date)
                .push_bind(&payment.method)
                .push_bind(&payment.status);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}
