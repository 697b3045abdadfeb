use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Utc;

use crate::core::models::{
    admin::Admin,
    membership::{Insert as MembershipInsert, MembershipStatus, MembershipWithStudent, Query as MembershipQuery},
    notification::{Insert as NotificationInsert, Notice, Notification, Query as NotificationQuery},
};
use crate::core::ports::{
    notifier::{Channel, Notifier},
    repository::{AdminCommon, Common, Manager, MembershipCommon, NotificationCommon, Store, StudentCommon, TxStore},
};
use crate::error::Error;

struct Student {
    id: i32,
    email: String,
    first_name: String,
    last_name: String,
    phone_number: String,
}

#[derive(Default)]
struct State {
    students: Vec<Student>,
    admins: HashMap<String, Vec<Admin>>,
    memberships: Vec<MembershipWithStudent>,
    notifications: Vec<Notification>,
    fail_admin_lookup: bool,
}

impl State {
    fn position(&self, student_email: &str, club_id: &str) -> Option<usize> {
        self.memberships.iter().position(|m| m.student_email == student_email && m.club_id == club_id)
    }
}

/// In-memory stand-in for the postgres store. Clones share one state, so the
/// handle doubles as its own [`Manager`]; commit and rollback are no-ops.
#[derive(Clone, Default)]
pub struct MemStore {
    state: Rc<RefCell<State>>,
}

impl MemStore {
    pub fn add_student(&self, id: i32, email: &str, first_name: &str, last_name: &str, phone_number: &str) {
        self.state.borrow_mut().students.push(Student {
            id,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
        });
    }

    pub fn add_admin(&self, club_id: &str, admin: Admin) {
        self.state.borrow_mut().admins.entry(club_id.into()).or_default().push(admin);
    }

    pub fn fail_admin_lookup(&self) {
        self.state.borrow_mut().fail_admin_lookup = true;
    }

    pub fn memberships(&self) -> Vec<(String, String, MembershipStatus)> {
        self.state.borrow().memberships.iter().map(|m| (m.student_email.clone(), m.club_id.clone(), m.status)).collect()
    }

    fn matches(n: &Notification, query: &NotificationQuery) -> bool {
        query.admin_email_eq.as_ref().map_or(true, |e| &n.admin_email == e) && query.is_read_eq.map_or(true, |r| n.is_read == r)
    }
}

impl MembershipCommon for MemStore {
    async fn insert_if_absent(&mut self, data: MembershipInsert) -> Result<Option<i32>, Error> {
        let mut state = self.state.borrow_mut();
        if state.position(&data.student_email, &data.club_id).is_some() {
            return Ok(None);
        }
        let (first_name, last_name, phone_number) = match state.students.iter().find(|s| s.email == data.student_email) {
            Some(s) => (Some(s.first_name.clone()), Some(s.last_name.clone()), Some(s.phone_number.clone())),
            None => (None, None, None),
        };
        state.memberships.push(MembershipWithStudent {
            first_name,
            last_name,
            phone_number,
            student_email: data.student_email,
            club_id: data.club_id,
            status: data.status,
            created_at: Utc::now(),
        });
        Ok(Some(state.memberships.len() as i32))
    }

    async fn status(&mut self, student_email: &str, club_id: &str) -> Result<Option<MembershipStatus>, Error> {
        let state = self.state.borrow();
        Ok(state.position(student_email, club_id).map(|i| state.memberships[i].status))
    }

    async fn update_status(&mut self, student_email: &str, club_id: &str, status: MembershipStatus) -> Result<u64, Error> {
        let mut state = self.state.borrow_mut();
        match state.position(student_email, club_id) {
            Some(i) => {
                state.memberships[i].status = status;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&mut self, student_email: &str, club_id: &str) -> Result<u64, Error> {
        let mut state = self.state.borrow_mut();
        let before = state.memberships.len();
        state.memberships.retain(|m| !(m.student_email == student_email && m.club_id == club_id));
        Ok((before - state.memberships.len()) as u64)
    }

    async fn query(&mut self, query: &MembershipQuery) -> Result<Vec<MembershipWithStudent>, Error> {
        Ok(self
            .state
            .borrow()
            .memberships
            .iter()
            .filter(|m| query.club_id_eq.as_ref().map_or(true, |c| &m.club_id == c))
            .filter(|m| query.status_eq.map_or(true, |s| m.status == s))
            .cloned()
            .collect())
    }
}

impl AdminCommon for MemStore {
    async fn list_by_club(&mut self, club_id: &str) -> Result<Vec<Admin>, Error> {
        let state = self.state.borrow();
        if state.fail_admin_lookup {
            return Err(Error::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(state.admins.get(club_id).cloned().unwrap_or_default())
    }
}

impl StudentCommon for MemStore {
    async fn email_by_id(&mut self, id: i32) -> Result<Option<String>, Error> {
        Ok(self.state.borrow().students.iter().find(|s| s.id == id).map(|s| s.email.clone()))
    }
}

impl NotificationCommon for MemStore {
    async fn insert(&mut self, data: NotificationInsert) -> Result<i32, Error> {
        let mut state = self.state.borrow_mut();
        let id = state.notifications.len() as i32 + 1;
        let now = Utc::now();
        state.notifications.push(Notification {
            id,
            admin_email: data.admin_email,
            notification: data.notification,
            is_read: false,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn query(&mut self, query: &NotificationQuery) -> Result<Vec<Notification>, Error> {
        Ok(self.state.borrow().notifications.iter().rev().filter(|n| Self::matches(n, query)).cloned().collect())
    }

    async fn count(&mut self, query: &NotificationQuery) -> Result<i64, Error> {
        Ok(self.state.borrow().notifications.iter().filter(|n| Self::matches(n, query)).count() as i64)
    }

    async fn mark_read(&mut self, admin_email: &str, id: Option<i32>) -> Result<u64, Error> {
        let mut updated = 0;
        for n in self.state.borrow_mut().notifications.iter_mut() {
            if n.admin_email == admin_email && !n.is_read && id.map_or(true, |id| n.id == id) {
                n.is_read = true;
                n.updated_at = Utc::now();
                updated += 1;
            }
        }
        Ok(updated)
    }
}

impl Common for MemStore {}
impl Store for MemStore {}

impl TxStore for MemStore {
    async fn commit(self) -> Result<(), Error> {
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}

impl Manager for MemStore {
    type Conn = MemStore;
    type Tx = MemStore;

    async fn acquire(&self) -> Result<Self::Conn, Error> {
        Ok(self.clone())
    }

    async fn begin(&self) -> Result<Self::Tx, Error> {
        Ok(self.clone())
    }
}

/// Notifier that records every attempt, optionally failing for one recipient.
pub struct RecordingNotifier {
    channel: Channel,
    fail_for: Option<String>,
    sent: RefCell<Vec<(String, Notice)>>,
}

impl RecordingNotifier {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            fail_for: None,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_for(channel: Channel, recipient: &str) -> Self {
        Self {
            fail_for: Some(recipient.into()),
            ..Self::new(channel)
        }
    }

    pub fn sent(&self) -> Vec<(String, Notice)> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn notify<S>(&self, _: &mut S, recipient: &str, notice: &Notice) -> Result<(), Error>
    where
        S: NotificationCommon,
    {
        if self.fail_for.as_deref() == Some(recipient) {
            return Err(Error::MailError(format!("mailbox {} unavailable", recipient)));
        }
        self.sent.borrow_mut().push((recipient.into(), notice.clone()));
        Ok(())
    }
}
