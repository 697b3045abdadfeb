use crate::actix_web::{self, FromRequest, HttpMessage};
use crate::error::Error;
use std::fmt;
use std::future::{ready, Ready};

/// Caller identity attached to the request by the jwt middleware.
#[derive(Debug, Clone)]
pub struct UserInfo {
    /// Student or admin id, absent when the issuer signed neither.
    pub id: Option<String>,
    pub email: Option<String>,
    pub role: String,
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.as_deref().unwrap_or("-");
        match &self.email {
            Some(email) => write!(f, "{} <{}> ({})", id, email, self.role),
            None => write!(f, "{} ({})", id, self.role),
        }
    }
}

impl FromRequest for UserInfo {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<Self>() {
            ready(Ok(user.clone()))
        } else {
            ready(Err(Error::Unauthorized("Authorization token is missing.".into())))
        }
    }
}
