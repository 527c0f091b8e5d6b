use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use tatami_data::{
    Delete,
    Update,
    Insert,
    Query,
    Retrieve,
    Member,
    MemberFilter,
};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                email,
                phone,
                activity,
                membership_start,
                membership_end
            FROM members
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
        if let Some(email) = filter.email.clone() {
            qry.push(" AND email LIKE ").push_bind(email);
        }
        if let Some(activity) = filter.activity.clone() {
            qry.push(" AND activity = ").push_bind(activity);
        }

        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    type Key = u32;
    async fn retrieve(&self, member_id: Self::Key) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let member = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    async fn insert(&self, member: Member) -> Result<Member> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO members (
                    first_name,
                    last_name,
                    email,
                    phone,
                    activity,
                    membership_start,
                    membership_end
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.first_name)
                .push_bind(&member.last_name)
                .push_bind(&member.email)
                .push_bind(&member.phone)
                .push_bind(&member.activity)
                .push_bind(member.membership_start)
                .push_bind(member.membership_end);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}


#[async_trait]
impl Update<Member> for Connection {
    /// Update member
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE members SET")
                .push(" first_name = ")
                .push_bind(&member.first_name)
                .push(", last_name = ")
                .push_bind(&member.last_name)
                .push(", email = ")
                .push_bind(&member.email)
                .push(", phone = ")
                .push_bind(&member.phone)
                .push(", activity = ")
                .push_bind(&member.activity)
                .push(", membership_start = ")
                .push_bind(member.membership_start)
                .push(", membership_end = ")
                .push_bind(member.membership_end)
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    /// Delete member
    async fn delete(&self, member: Member) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member.id)
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
    async fn test_member_insert() {
        let (_handle, db) = Connection::open_test().await;
        let today: NaiveDate = chrono::Local::now().date_naive();
        let member = Member {
            first_name: "Sophie".to_string(),
            last_name: "Martin".to_string(),
            email: "sophie@club.example".to_string(),
            phone: "0600000001".to_string(),
            activity: "Judo".to_string(),
            membership_start: today,
            ..Member::default()
        };
        let member = db.insert(member).await.unwrap();

        assert!(member.id > 0);
        assert_eq!(member.first_name, "Sophie");
        assert_eq!(member.last_name, "Martin");
        assert_eq!(member.email, "sophie@club.example");
        assert_eq!(member.phone, "0600000001");
        assert_eq!(member.activity, "Judo");
        assert_eq!(member.membership_start, today);
        assert_eq!(member.membership_end, None);
    }

    #[tokio::test]
    async fn test_member_update() {
        let (_handle, db) = Connection::open_test().await;
        let member = Member {
            first_name: "Sophie".to_string(),
            last_name: "Martin".to_string(),
            membership_start: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
            ..Member::default()
        };
        let mut member = db.insert(member).await.unwrap();
        member.email = "new@club.example".to_string();
        member.activity = "Yoga".to_string();
        member.membership_end = Some(NaiveDate::from_ymd_opt(2024, 8, 31).unwrap());

        let member = db.update(member).await.unwrap();
        assert_eq!(member.email, "new@club.example");
        assert_eq!(member.activity, "Yoga");
        assert_eq!(
            member.membership_end,
            Some(NaiveDate::from_ymd_opt(2024, 8, 31).unwrap())
        );
    }

    #[tokio::test]
    async fn test_member_filter_name_like() {
        let (_handle, db) = Connection::open_test().await;
        db.insert(Member {
            first_name: "Sophie".to_string(),
            last_name: "Martin".to_string(),
            ..Default::default()
        }).await.unwrap();
        db.insert(Member {
            first_name: "Karim".to_string(),
            last_name: "Benali".to_string(),
            ..Default::default()
        }).await.unwrap();

        // Match across first and last name, case insensitive
        let filter = MemberFilter {
            name: Some("sophie mar".to_string()),
            ..MemberFilter::default()
        };
        let members: Vec<Member> = db.query(&filter).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].last_name, "Martin");

        let filter = MemberFilter {
            name: Some("nobody".to_string()),
            ..MemberFilter::default()
        };
        let members: Vec<Member> = db.query(&filter).await.unwrap();
        assert_eq!(members.len(), 0);
    }

    #[tokio::test]
    async fn test_member_filter_activity() {
        let (_handle, db) = Connection::open_test().await;
        db.insert(Member {
            first_name: "Sophie".to_string(),
            last_name: "Martin".to_string(),
            activity: "Judo".to_string(),
            ..Default::default()
        }).await.unwrap();
        db.insert(Member {
            first_name: "Karim".to_string(),
            last_name: "Benali".to_string(),
            activity: "Yoga".to_string(),
            ..Default::default()
        }).await.unwrap();

        let filter = MemberFilter {
            activity: Some("Yoga".to_string()),
            ..MemberFilter::default()
        };
        let members: Vec<Member> = db.query(&filter).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].first_name, "Karim");
    }

    #[tokio::test]
    async fn test_member_delete() {
        let (_handle, db) = Connection::open_test().await;
        let member = Member {
            first_name: "Sophie".to_string(),
            last_name: "Martin".to_string(),
            ..Member::default()
        };
        let member = db.insert(member).await.unwrap();
        let member_id = member.id;

        db.delete(member).await.unwrap();

        let gone: Result<Member> = db.retrieve(member_id).await;
        assert!(gone.is_err());
    }

    #[tokio::test]
    async fn test_member_get_related_payments() {
        use tatami_data::Payment;

        let (_handle, db) = Connection::open_test().await;
        let m = db.insert(Member {
            first_name: "Sophie".to_string(),
            last_name: "Martin".to_string(),
            ..Default::default()
        }).await.unwrap();

        db.insert(Payment {
            member_id: m.id,
            amount: 35.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            method: "carte".to_string(),
            status: "valide".to_string(),
            ..Default::default()
        }).await.unwrap();
        db.insert(Payment {
            member_id: m.id,
            amount: 35.0,
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            method: "carte".to_string(),
            status: "valide".to_string(),
            ..Default::default()
        }).await.unwrap();

        let payments = m.get_payments(&db).await.unwrap();
        assert_eq!(payments.len(), 2);
    }
}
