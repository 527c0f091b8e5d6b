use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use tatami_data::{
    Insert,
    Query,
    Retrieve,
    Expense,
    ExpenseFilter,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Expense> for Connection {
    type Filter = ExpenseFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Expense>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                category,
                description,
                ROUND(amount, 10) AS amount,
                date,
                status
            FROM expenses
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(category) = filter.category.clone() {
            qry.push(" AND category = ").push_bind(category);
        }
        if let Some(status) = filter.status.clone() {
            qry.push(" AND status = ").push_bind(status);
        }
        if let Some(month) = filter.month {
            qry.push(" AND strftime('%Y-%m', date) = ")
                .push_bind(month.to_string());
        }
        qry.push(" ORDER BY date DESC, id DESC");

        let expenses: Vec<Expense> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(expenses)
    }
}

#[async_trait]
impl Retrieve<Expense> for Connection {
    type Key = u32;
    async fn retrieve(&self, expense_id: Self::Key) -> Result<Expense> {
        let filter = ExpenseFilter {
            id: Some(expense_id),
            ..Default::default()
        };
        let expense = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(expense)
    }
}

// Expenses are append only, ledger rows are never rewritten.
#[async_trait]
impl Insert<Expense> for Connection {
    async fn insert(&self, expense: Expense) -> Result<Expense> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO expenses (
                    category,
                    description,
                    amount,
                    date,
                    status
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&expense.category)
                .push_bind(&expense.description)
                .push_bind(expense.amount)
                .push_bind(expense.date)
                .push_bind(&expense.status);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[tokio::test]
    async fn test_expense_insert() {
        let (_handle, db) = Connection::open_test().await;

        let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let expense = Expense {
            category: "equipement".to_string(),
            description: "Tatami replacement".to_string(),
            amount: 900.0,
            date,
            status: "paye".to_string(),
            ..Default::default()
        };

        let expense = db.insert(expense).await.unwrap();
        assert!(expense.id > 0);
        assert_eq!(expense.category, "equipement");
        assert_eq!(expense.description, "Tatami replacement");
        assert_eq!(expense.amount, 900.0);
        assert_eq!(expense.date, date);
        assert_eq!(expense.status, "paye");
    }

    #[tokio::test]
    async fn test_expense_filter() {
        let (_handle, db) = Connection::open_test().await;

        db.insert(Expense {
            category: "equipement".to_string(),
            amount: 900.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            status: "paye".to_string(),
            ..Default::default()
        }).await.unwrap();
        db.insert(Expense {
            category: "entretien".to_string(),
            amount: 120.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            status: "prevu".to_string(),
            ..Default::default()
        }).await.unwrap();
        db.insert(Expense {
            category: "equipement".to_string(),
            amount: 50.0,
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            status: "paye".to_string(),
            ..Default::default()
        }).await.unwrap();

        let filter = ExpenseFilter {
            category: Some("equipement".to_string()),
            month: Some("2024-06".parse().unwrap()),
            ..Default::default()
        };
        let expenses: Vec<Expense> = db.query(&filter).await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].amount, 900.0);

        let filter = ExpenseFilter {
            status: Some("prevu".to_string()),
            ..Default::default()
        };
        let expenses: Vec<Expense> = db.query(&filter).await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, "entretien");
    }
}
