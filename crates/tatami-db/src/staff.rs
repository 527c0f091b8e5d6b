use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use tatami_data::{
    Delete,
    Insert,
    Query,
    Retrieve,
    StaffFilter,
    StaffMember,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<StaffMember> for Connection {
    type Filter = StaffFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<StaffMember>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                role,
                email,
                hired_on
            FROM staff
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND first_name || ' ' || last_name LIKE ")
                .push_bind(format!("%{}%", name));
        }
        if let Some(role) = filter.role.clone() {
            qry.push(" AND role = ").push_bind(role);
        }

        let staff: Vec<StaffMember> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(staff)
    }
}

#[async_trait]
impl Retrieve<StaffMember> for Connection {
    type Key = u32;
    async fn retrieve(&self, staff_id: Self::Key) -> Result<StaffMember> {
        let filter = StaffFilter {
            id: Some(staff_id),
            ..Default::default()
        };
        let staff = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(staff)
    }
}

#[async_trait]
impl Insert<StaffMember> for Connection {
    async fn insert(&self, staff: StaffMember) -> Result<StaffMember> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO staff (
                    first_name,
                    last_name,
                    role,
                    email,
                    hired_on
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&staff.first_name)
                .push_bind(&staff.last_name)
                .push_bind(&staff.role)
                .push_bind(&staff.email)
                .push_bind(staff.hired_on);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Delete<StaffMember> for Connection {
    async fn delete(&self, staff: StaffMember) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM staff WHERE id = ")
            .push_bind(staff.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[tokio::test]
    async fn test_staff_insert_and_role_filter() {
        let (_handle, db) = Connection::open_test().await;

        db.insert(StaffMember {
            first_name: "Marc".to_string(),
            last_name: "Petit".to_string(),
            role: "coach".to_string(),
            email: "marc@club.example".to_string(),
            hired_on: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
            ..Default::default()
        }).await.unwrap();
        db.insert(StaffMember {
            first_name: "Lea".to_string(),
            last_name: "Moreau".to_string(),
            role: "accueil".to_string(),
            email: "lea@club.example".to_string(),
            hired_on: NaiveDate::from_ymd_opt(2023, 1, 9).unwrap(),
            ..Default::default()
        }).await.unwrap();

        let staff: Vec<StaffMember> = db.query(&StaffFilter {
            role: Some("coach".to_string()),
            ..Default::default()
        }).await.unwrap();
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].full_name(), "Marc Petit");
    }
}
