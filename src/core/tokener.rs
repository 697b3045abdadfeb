use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Claims carried by a bearer token: an optional subject id, optional email and a role.
pub trait Payload: Serialize + for<'d> Deserialize<'d> {
    fn subject(&self) -> Option<String>;
    fn email(&self) -> Option<&str>;
    fn role(&self) -> &str;
}

pub trait Tokener<P: Payload> {
    fn gen_token(&self, payload: &P) -> Result<String, Error>;
    fn verify_token(&self, token: &str) -> Result<P, Error>;
}
