use futures::future::LocalBoxFuture;
use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};

use crate::actix_web::{
    dev::{Service, ServiceRequest, Transform},
    Error, HttpMessage,
};
use crate::context::UserInfo;
use crate::core::tokener::{Payload, Tokener};
use crate::error::Error as AppError;
use crate::impls::tokener::jwt::JWT;
use std::fmt;
use std::future::{ready, Ready};

fn default_role() -> String {
    "student".into()
}

/// Id claim as issued by the login routes, a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Subject {
    Number(i64),
    Text(String),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Student tokens carry `student_id`, admin tokens `admin_id` (plus `role` and
/// `club_id`); `sub` is honoured when present. Unknown claims are ignored.
#[derive(Debug, Deserialize, Serialize)]
pub struct Claim {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    pub exp: i64,
}

impl Payload for Claim {
    fn subject(&self) -> Option<String> {
        self.sub.as_ref().or(self.student_id.as_ref()).or(self.admin_id.as_ref()).map(Subject::to_string)
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn role(&self) -> &str {
        &self.role
    }
}

/// Rejects requests without a valid bearer token and attaches the caller's [`UserInfo`].
pub(crate) struct JWTMiddleware {
    secret: Vec<u8>,
}

impl JWTMiddleware {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<S> Transform<S, ServiceRequest> for JWTMiddleware
where
    S: Service<ServiceRequest> + 'static,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Error = Error;
    type Response = S::Response;
    type Transform = JWTService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JWTService {
            tokener: JWT::new(&self.secret),
            next_service: service,
        }))
    }
}

pub struct JWTService<S> {
    tokener: JWT,
    next_service: S,
}

impl<S> JWTService<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<UserInfo, AppError> {
        let header = req
            .headers()
            .get("Authorization")
            .ok_or_else(|| AppError::Unauthorized("Authorization token is missing.".into()))?;
        let header = header.to_str().map_err(|_| AppError::Unauthorized("Invalid token.".into()))?;
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("Authorization token is missing.".into()));
        }
        let claim = <JWT as Tokener<Claim>>::verify_token(&self.tokener, token).map_err(|e| match e {
            AppError::JWTError(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => AppError::Unauthorized("Token has expired.".into()),
            _ => AppError::Unauthorized("Invalid token.".into()),
        })?;
        Ok(UserInfo {
            id: claim.subject(),
            email: claim.email().map(str::to_owned),
            role: claim.role().to_owned(),
        })
    }
}

impl<S> Service<ServiceRequest> for JWTService<S>
where
    S: Service<ServiceRequest>,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Response = S::Response;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.next_service.poll_ready(ctx).map_err(|e| e.into())
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.authenticate(&req) {
            Err(e) => {
                log::debug!("rejected {} {}: {}", req.method(), req.path(), e);
                return Box::pin(async move { Err(e.into()) });
            }
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
        }

        let res_fut = self.next_service.call(req);
        Box::pin(async move {
            let resp = res_fut.await.map_err(|e| e.into())?;
            Ok(resp)
        })
    }
}
