use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use tatami_data::{
    CreditEntry,
    DebitEntry,
    ExpenseCategory,
    LedgerFilter,
    MethodTotal,
    Query,
    YearMonth,
    PAYMENT_VALID,
};

use crate::Connection;

/// Credits are payments joined with their member. The member name
/// becomes the entry description, the subscribed activity its category.
#[async_trait]
impl Query<CreditEntry> for Connection {
    type Filter = LedgerFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<CreditEntry>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                p.id,
                m.first_name || ' ' || m.last_name AS description,
                m.activity AS category,
                ROUND(p.amount, 10) AS amount,
                p.date,
                p.status,
                p.method
            FROM payments p
            JOIN members m ON m.id = p.member_id
            WHERE 1
            "#,
        );

        if let Some(status) = filter.status.clone() {
            qry.push(" AND p.status = ").push_bind(status);
        }
        if let Some(month) = filter.month {
            qry.push(" AND strftime('%Y-%m', p.date) = ")
                .push_bind(month.to_string());
        }
        if let Some(search) = filter.search.clone() {
            let pattern = format!("%{}%", search);
            qry.push(" AND (m.first_name || ' ' || m.last_name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR m.activity LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qry.push(" ORDER BY p.date DESC, p.id DESC");

        let entries: Vec<CreditEntry> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(entries)
    }
}

/// Debits come straight from the expenses table.
#[async_trait]
impl Query<DebitEntry> for Connection {
    type Filter = LedgerFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<DebitEntry>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                description,
                category,
                ROUND(amount, 10) AS amount,
                date,
                status
            FROM expenses
            WHERE 1
            "#,
        );

        if let Some(status) = filter.status.clone() {
            qry.push(" AND status = ").push_bind(status);
        }
        if let Some(month) = filter.month {
            qry.push(" AND strftime('%Y-%m', date) = ")
                .push_bind(month.to_string());
        }
        if let Some(search) = filter.search.clone() {
            let pattern = format!("%{}%", search);
            qry.push(" AND (description LIKE ")
                .push_bind(pattern.clone())
                .push(" OR category LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qry.push(" ORDER BY date DESC, id DESC");

        let entries: Vec<DebitEntry> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(entries)
    }
}

/// Every category ever used by an expense, for the filter dropdown.
#[async_trait]
impl Query<ExpenseCategory> for Connection {
    type Filter = ();
    async fn query(&self, _filter: &Self::Filter) -> Result<Vec<ExpenseCategory>> {
        let mut conn = self.lock().await;
        let categories: Vec<ExpenseCategory> =
            sqlx::query_as("SELECT DISTINCT category FROM expenses ORDER BY category")
                .fetch_all(&mut *conn)
                .await?;
        Ok(categories)
    }
}

/// Validated payment volume per method, optionally narrowed to a month.
#[async_trait]
impl Query<MethodTotal> for Connection {
    type Filter = Option<YearMonth>;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<MethodTotal>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                method,
                ROUND(SUM(amount), 10) AS total
            FROM payments
            WHERE status =
            "#,
        );
        qry.push_bind(PAYMENT_VALID);
        if let Some(month) = filter {
            qry.push(" AND strftime('%Y-%m', date) = ")
                .push_bind(month.to_string());
        }
        qry.push(" GROUP BY method ORDER BY total DESC");

        let totals: Vec<MethodTotal> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    use tatami_data::{Expense, Insert, Member, Payment};

    async fn seed(db: &Connection) {
        let sophie = db.insert(Member {
            first_name: "Sophie".to_string(),
            last_name: "Martin".to_string(),
            activity: "Judo".to_string(),
            ..Default::default()
        }).await.unwrap();
        let karim = db.insert(Member {
            first_name: "Karim".to_string(),
            last_name: "Benali".to_string(),
            activity: "Yoga".to_string(),
            ..Default::default()
        }).await.unwrap();

        db.insert(Payment {
            member_id: sophie.id,
            amount: 35.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            method: "carte".to_string(),
            status: "valide".to_string(),
            ..Default::default()
        }).await.unwrap();
        db.insert(Payment {
            member_id: karim.id,
            amount: 30.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
            method: "especes".to_string(),
            status: "en_attente".to_string(),
            ..Default::default()
        }).await.unwrap();
        db.insert(Payment {
            member_id: sophie.id,
            amount: 35.0,
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            method: "virement".to_string(),
            status: "valide".to_string(),
            ..Default::default()
        }).await.unwrap();

        db.insert(Expense {
            category: "equipement".to_string(),
            description: "Tatami replacement".to_string(),
            amount: 900.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            status: "paye".to_string(),
            ..Default::default()
        }).await.unwrap();
        db.insert(Expense {
            category: "entretien".to_string(),
            description: "Shower repair".to_string(),
            amount: 120.0,
            date: NaiveDate::from_ymd_opt(2024, 7, 5).unwrap(),
            status: "prevu".to_string(),
            ..Default::default()
        }).await.unwrap();
    }

    #[tokio::test]
    async fn test_credit_entries_join_member() {
        let (_handle, db) = Connection::open_test().await;
        seed(&db).await;

        let credits: Vec<CreditEntry> =
            db.query(&LedgerFilter::default()).await.unwrap();
        assert_eq!(credits.len(), 3);

        // Newest first
        assert_eq!(credits[0].date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(credits[0].description, "Sophie Martin");
        assert_eq!(credits[0].category, "Judo");
        assert_eq!(credits[0].method, "virement");

        assert_eq!(credits[1].description, "Karim Benali");
        assert_eq!(credits[1].category, "Yoga");
    }

    #[tokio::test]
    async fn test_credit_entries_month_and_status() {
        let (_handle, db) = Connection::open_test().await;
        seed(&db).await;

        let filter = LedgerFilter {
            status: Some("valide".to_string()),
            month: Some("2024-06".parse().unwrap()),
            ..Default::default()
        };
        let credits: Vec<CreditEntry> = db.query(&filter).await.unwrap();
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].amount, 35.0);
        assert_eq!(credits[0].method, "carte");
    }

    #[tokio::test]
    async fn test_credit_entries_search_matches_name_and_activity() {
        let (_handle, db) = Connection::open_test().await;
        seed(&db).await;

        let filter = LedgerFilter {
            search: Some("benali".to_string()),
            ..Default::default()
        };
        let credits: Vec<CreditEntry> = db.query(&filter).await.unwrap();
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].description, "Karim Benali");

        let filter = LedgerFilter {
            search: Some("judo".to_string()),
            ..Default::default()
        };
        let credits: Vec<CreditEntry> = db.query(&filter).await.unwrap();
        assert_eq!(credits.len(), 2);
    }

    #[tokio::test]
    async fn test_debit_entries() {
        let (_handle, db) = Connection::open_test().await;
        seed(&db).await;

        let debits: Vec<DebitEntry> =
            db.query(&LedgerFilter::default()).await.unwrap();
        assert_eq!(debits.len(), 2);
        assert_eq!(debits[0].description, "Shower repair");

        let filter = LedgerFilter {
            search: Some("tatami".to_string()),
            ..Default::default()
        };
        let debits: Vec<DebitEntry> = db.query(&filter).await.unwrap();
        assert_eq!(debits.len(), 1);
        assert_eq!(debits[0].category, "equipement");
    }

    #[tokio::test]
    async fn test_expense_categories_distinct_sorted() {
        let (_handle, db) = Connection::open_test().await;
        seed(&db).await;

        // A second expense in an existing category must not duplicate it
        db.insert(Expense {
            category: "equipement".to_string(),
            description: "Gloves".to_string(),
            amount: 60.0,
            date: NaiveDate::from_ymd_opt(2024, 7, 8).unwrap(),
            status: "paye".to_string(),
            ..Default::default()
        }).await.unwrap();

        let categories: Vec<ExpenseCategory> = db.query(&()).await.unwrap();
        let names: Vec<String> = categories.into_iter().map(|c| c.category).collect();
        assert_eq!(names, vec!["entretien".to_string(), "equipement".to_string()]);
    }

    #[tokio::test]
    async fn test_method_totals_only_count_valid() {
        let (_handle, db) = Connection::open_test().await;
        seed(&db).await;

        let totals: Vec<MethodTotal> = db.query(&None).await.unwrap();
        let methods: Vec<&str> = totals.iter().map(|t| t.method.as_str()).collect();
        // en_attente especes payment is excluded
        assert!(!methods.contains(&"especes"));
        assert_eq!(totals.iter().map(|t| t.total).sum::<f64>(), 70.0);

        let totals: Vec<MethodTotal> =
            db.query(&Some("2024-06".parse().unwrap())).await.unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].method, "carte");
        assert_eq!(totals[0].total, 35.0);
    }
}
