use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(type_name = "admin_role")]
pub enum AdminRole {
    SuperAdmin,
    ManagementAdmin,
    EventAdmin,
    FinancialAdmin,
    MarketAdmin,
}

/// Directory entry for an admin responsible for a club.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Admin {
    pub email: String,
    pub role: AdminRole,
    pub is_active: bool,
}
