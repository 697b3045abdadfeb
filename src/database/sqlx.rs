use crate::core::models::{
    admin::Admin,
    membership::{Insert as MembershipInsert, MembershipStatus, MembershipWithStudent, Query as MembershipQuery},
    notification::{Insert as NotificationInsert, Notification, Query as NotificationQuery},
};
use crate::core::ports::repository::{AdminCommon, Common, Manager, MembershipCommon, NotificationCommon, Store, StudentCommon, TxStore};
use crate::error::Error;
use sqlx::pool::PoolConnection;
use sqlx::{query, query_as, query_scalar, Executor, PgPool, Postgres, QueryBuilder, Transaction};

pub struct PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> MembershipCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert_if_absent(&mut self, data: MembershipInsert) -> Result<Option<i32>, Error> {
        let id = query_scalar(
            "
        INSERT INTO membership (student_email, club_id, status)
        VALUES ($1, $2, $3)
        ON CONFLICT (student_email, club_id) DO NOTHING
        RETURNING id",
        )
        .bind(data.student_email)
        .bind(data.club_id)
        .bind(data.status)
        .fetch_optional(&mut self.executor)
        .await?;
        Ok(id)
    }

    async fn status(&mut self, student_email: &str, club_id: &str) -> Result<Option<MembershipStatus>, Error> {
        let status = query_scalar("SELECT status FROM membership WHERE student_email = $1 AND club_id = $2")
            .bind(student_email)
            .bind(club_id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(status)
    }

    async fn update_status(&mut self, student_email: &str, club_id: &str, status: MembershipStatus) -> Result<u64, Error> {
        let res = query("UPDATE membership SET status = $1 WHERE student_email = $2 AND club_id = $3")
            .bind(status)
            .bind(student_email)
            .bind(club_id)
            .execute(&mut self.executor)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete(&mut self, student_email: &str, club_id: &str) -> Result<u64, Error> {
        let res = query("DELETE FROM membership WHERE student_email = $1 AND club_id = $2")
            .bind(student_email)
            .bind(club_id)
            .execute(&mut self.executor)
            .await?;
        Ok(res.rows_affected())
    }

    async fn query(&mut self, query: &MembershipQuery) -> Result<Vec<MembershipWithStudent>, Error> {
        let mut stmt = QueryBuilder::new(
            "
        SELECT
            m.student_email,
            m.club_id,
            m.status,
            m.created_at,
            s.first_name,
            s.last_name,
            s.phone_number
        FROM membership AS m
        LEFT JOIN students AS s ON m.student_email = s.email
        WHERE 1 = 1",
        );
        if let Some(club_id) = &query.club_id_eq {
            stmt.push(" AND m.club_id = ").push_bind(club_id.clone());
        }
        if let Some(status) = query.status_eq {
            stmt.push(" AND m.status = ").push_bind(status);
        }
        stmt.push(" ORDER BY m.created_at, m.id");
        let memberships = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(memberships)
    }
}

impl<E> AdminCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn list_by_club(&mut self, club_id: &str) -> Result<Vec<Admin>, Error> {
        let admins = query_as("SELECT email, role, is_active FROM admins WHERE club_id = $1 ORDER BY id")
            .bind(club_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(admins)
    }
}

impl<E> StudentCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn email_by_id(&mut self, id: i32) -> Result<Option<String>, Error> {
        let email = query_scalar("SELECT email FROM students WHERE id = $1").bind(id).fetch_optional(&mut self.executor).await?;
        Ok(email)
    }
}

impl<E> NotificationCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, data: NotificationInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO notification_admin (admin_email, notification) VALUES ($1, $2) RETURNING id")
            .bind(data.admin_email)
            .bind(data.notification)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn query(&mut self, query: &NotificationQuery) -> Result<Vec<Notification>, Error> {
        let mut stmt = QueryBuilder::new("SELECT * FROM notification_admin WHERE 1 = 1");
        push_notification_filters(&mut stmt, query);
        stmt.push(" ORDER BY created_at DESC, id DESC");
        let notifications = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(notifications)
    }

    async fn count(&mut self, query: &NotificationQuery) -> Result<i64, Error> {
        let mut stmt = QueryBuilder::new("SELECT COUNT(*) FROM notification_admin WHERE 1 = 1");
        push_notification_filters(&mut stmt, query);
        let (n,): (i64,) = stmt.build_query_as().fetch_one(&mut self.executor).await?;
        Ok(n)
    }

    async fn mark_read(&mut self, admin_email: &str, id: Option<i32>) -> Result<u64, Error> {
        let res = query(
            "
        UPDATE notification_admin SET is_read = TRUE, updated_at = NOW()
        WHERE admin_email = $1
            AND is_read = FALSE
            AND ($2::INT IS NULL OR id = $2)",
        )
        .bind(admin_email)
        .bind(id)
        .execute(&mut self.executor)
        .await?;
        Ok(res.rows_affected())
    }
}

fn push_notification_filters(stmt: &mut QueryBuilder<'_, Postgres>, query: &NotificationQuery) {
    if let Some(email) = &query.admin_email_eq {
        stmt.push(" AND admin_email = ").push_bind(email.clone());
    }
    if let Some(is_read) = query.is_read_eq {
        stmt.push(" AND is_read = ").push_bind(is_read);
    }
}

impl Store for PgSqlx<PoolConnection<Postgres>> {}
impl<'a> Store for PgSqlx<Transaction<'a, Postgres>> {}
impl Common for PgSqlx<PoolConnection<Postgres>> {}
impl<'a> Common for PgSqlx<Transaction<'a, Postgres>> {}

impl<'a> TxStore for PgSqlx<Transaction<'a, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Manager for PgSqlxManager {
    type Conn = PgSqlx<PoolConnection<Postgres>>;
    type Tx = PgSqlx<Transaction<'static, Postgres>>;

    async fn acquire(&self) -> Result<Self::Conn, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgSqlx { executor: conn })
    }

    async fn begin(&self) -> Result<Self::Tx, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgSqlx { executor: tx })
    }
}
