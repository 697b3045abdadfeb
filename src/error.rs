use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error as ThisError;

use crate::jsonwebtoken::errors::Error as JsonWebTokenError;

// postgres SQLSTATE for foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("jwt error: {0}")]
    JWTError(#[from] JsonWebTokenError),

    #[error("{0}")]
    Validation(String),

    #[error("business error: {0}")]
    BusinessError(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("mail error: {0}")]
    MailError(String),

    #[error("config error: {0}")]
    ConfigError(String),
}

impl Error {
    fn is_foreign_key_violation(&self) -> bool {
        match self {
            Error::DatabaseError(sqlx::Error::Database(e)) => e.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
            _ => false,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::Unauthorized(msg) => msg.clone(),
            Error::BusinessError(msg) => msg.clone(),
            _ if self.is_foreign_key_violation() => "referenced student or club does not exist".into(),
            _ => "internal server error".into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::BusinessError(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ if self.is_foreign_key_violation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(ErrorBody { error: self.public_message() })
    }
}
