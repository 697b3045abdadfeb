use crate::error::Error;
use crate::serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AdminEmail {
    pub admin_email: Option<String>,
}

impl AdminEmail {
    pub fn required(self) -> Result<String, Error> {
        required(self.admin_email, "admin_email is required")
    }
}

/// Treats a missing or blank field as a validation failure.
pub fn required(value: Option<String>, msg: &str) -> Result<String, Error> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        _ => Err(Error::Validation(msg.into())),
    }
}
