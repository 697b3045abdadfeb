use crate::core::models::{
    admin::Admin,
    membership::{Insert as MembershipInsert, MembershipStatus, MembershipWithStudent, Query as MembershipQuery},
    notification::{Insert as NotificationInsert, Notification, Query as NotificationQuery},
};
use crate::error::Error;

pub trait MembershipCommon {
    /// Inserts the row unless the (student, club) pair already has one; returns the new id.
    async fn insert_if_absent(&mut self, data: MembershipInsert) -> Result<Option<i32>, Error>;
    async fn status(&mut self, student_email: &str, club_id: &str) -> Result<Option<MembershipStatus>, Error>;
    async fn update_status(&mut self, student_email: &str, club_id: &str, status: MembershipStatus) -> Result<u64, Error>;
    async fn delete(&mut self, student_email: &str, club_id: &str) -> Result<u64, Error>;
    async fn query(&mut self, query: &MembershipQuery) -> Result<Vec<MembershipWithStudent>, Error>;
}

pub trait AdminCommon {
    async fn list_by_club(&mut self, club_id: &str) -> Result<Vec<Admin>, Error>;
}

pub trait StudentCommon {
    async fn email_by_id(&mut self, id: i32) -> Result<Option<String>, Error>;
}

pub trait NotificationCommon {
    async fn insert(&mut self, data: NotificationInsert) -> Result<i32, Error>;
    async fn query(&mut self, query: &NotificationQuery) -> Result<Vec<Notification>, Error>;
    async fn count(&mut self, query: &NotificationQuery) -> Result<i64, Error>;
    async fn mark_read(&mut self, admin_email: &str, id: Option<i32>) -> Result<u64, Error>;
}

pub trait Common: MembershipCommon + AdminCommon + StudentCommon + NotificationCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

/// Hands out request-scoped stores: a plain connection or a transaction.
pub trait Manager {
    type Conn: Store;
    type Tx: TxStore;
    async fn acquire(&self) -> Result<Self::Conn, Error>;
    async fn begin(&self) -> Result<Self::Tx, Error>;
}
