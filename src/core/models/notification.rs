use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Notification {
    pub id: i32,
    pub admin_email: String,
    pub notification: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub admin_email: String,
    pub notification: String,
}

#[derive(Debug, Default, Clone)]
pub struct Query {
    pub admin_email_eq: Option<String>,
    pub is_read_eq: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFilter {
    All,
    Read,
    Unread,
}

impl ReadFilter {
    pub fn is_read(&self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Read => Some(true),
            Self::Unread => Some(false),
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            Self::All => "No notifications found for the admin.",
            Self::Read => "No read notifications.",
            Self::Unread => "No unread notifications.",
        }
    }
}

/// Message handed to a notification channel. The in-app channel stores `summary`,
/// the email channel sends `subject` and `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub summary: String,
    pub subject: String,
    pub body: String,
}

impl Notice {
    pub fn membership_request(student_email: &str, club_id: &str) -> Self {
        Notice {
            summary: format!("Request membership from {}", student_email),
            subject: "New Membership Request".into(),
            body: format!(
                "Hi Admin,\n\nA new membership request has been made by {} for Club ID: {}.\n\nPlease log in to the dashboard to take appropriate action.\n\nThank you!",
                student_email, club_id
            ),
        }
    }
}
