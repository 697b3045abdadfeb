use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "membership_status")]
pub enum MembershipStatus {
    Pending,
    Approved,
    Rejected,
}

impl Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

impl FromStr for MembershipStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(Error::Validation(format!("invalid membership status({}), expected one of Pending, Approved, Rejected", s))),
        }
    }
}

/// How a caller names the student; ids are resolved to emails before the store is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentKey {
    Email(String),
    Id(i32),
}

impl Display for StudentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(email) => write!(f, "email {}", email),
            Self::Id(id) => write!(f, "id {}", id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub student_email: String,
    pub club_id: String,
    pub status: MembershipStatus,
}

#[derive(Debug, Default, Clone)]
pub struct Query {
    pub club_id_eq: Option<String>,
    pub status_eq: Option<MembershipStatus>,
}

/// A membership row joined with the student's display fields.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MembershipWithStudent {
    pub student_email: String,
    pub club_id: String,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Per-request summary of the notification fan-out.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    pub recipients: usize,
    pub attempted: usize,
    pub failed: usize,
    pub skipped: usize,
    pub lookup_failed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Created(Dispatch),
    Existing(MembershipStatus),
}

impl RequestOutcome {
    pub fn status(&self) -> MembershipStatus {
        match self {
            Self::Created(_) => MembershipStatus::Pending,
            Self::Existing(status) => *status,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Created(_) => "Membership added successfully, current status is 'pending'.".into(),
            Self::Existing(status) => format!("Current status: {}", status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(MembershipStatus),
    NotFound,
}

impl UpdateOutcome {
    pub fn message(&self) -> String {
        match self {
            Self::Updated(status) => format!("Membership status updated to '{}'.", status),
            Self::NotFound => "No membership found for this student in the specified club.".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

impl DeleteOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Deleted => "Membership deleted successfully.",
            Self::NotFound => "No matching membership found to delete.",
        }
    }
}
