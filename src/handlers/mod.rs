pub mod membership;
pub mod notification;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::web::{Json, JsonConfig, QueryConfig};
use actix_web::HttpRequest;

use crate::error::Error;
use crate::response::Message;

pub async fn home() -> Json<Message> {
    Json(Message::new("Welcome to the ClubHub API"))
}

/// Renders malformed JSON bodies as 400 `{error}` like every other validation failure.
pub fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err: JsonPayloadError, req: &HttpRequest| {
        log::debug!("bad json body on {}: {}", req.path(), err);
        Error::Validation(format!("Invalid input. {}", err)).into()
    })
}

pub fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err: QueryPayloadError, req: &HttpRequest| {
        log::debug!("bad query string on {}: {}", req.path(), err);
        Error::Validation(format!("Invalid query. {}", err)).into()
    })
}
