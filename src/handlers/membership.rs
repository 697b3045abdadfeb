use actix_web::web::{Data, Json, Query};
use actix_web::HttpResponse;
use log::info;
use serde::{Deserialize, Serialize};

use crate::context::UserInfo;
use crate::core::models::membership::{Dispatch, MembershipStatus, MembershipWithStudent, RequestOutcome, StudentKey, UpdateOutcome};
use crate::core::ports::{
    notifier::Notifier,
    repository::{Manager, TxStore},
};
use crate::core::services::{fanout::FanOut, membership};
use crate::error::Error;
use crate::request::required;
use crate::response::Message;

#[derive(Debug, Deserialize)]
pub struct Member {
    student_email: Option<String>,
    student_id: Option<i32>,
    club_id: Option<String>,
}

impl Member {
    fn into_parts(self) -> Result<(StudentKey, String), Error> {
        const MISSING: &str = "Invalid input. student_email (or student_id) and club_id are required.";
        let student = match (self.student_email, self.student_id) {
            (Some(email), _) if !email.trim().is_empty() => StudentKey::Email(email.trim().to_owned()),
            (_, Some(id)) => StudentKey::Id(id),
            _ => return Err(Error::Validation(MISSING.into())),
        };
        let club_id = required(self.club_id, MISSING)?;
        Ok((student, club_id))
    }
}

#[derive(Debug, Serialize)]
struct AddResponse {
    message: String,
    status: MembershipStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    notifications: Option<Dispatch>,
}

pub async fn add<D, I, E>(user_info: UserInfo, Json(member): Json<Member>, db: Data<D>, fan_out: Data<FanOut<I, E>>) -> Result<HttpResponse, Error>
where
    D: Manager + 'static,
    I: Notifier + 'static,
    E: Notifier + 'static,
{
    let (student, club_id) = member.into_parts()?;
    let mut conn = db.acquire().await?;
    let outcome = membership::request_membership(&mut conn, fan_out.get_ref(), student, &club_id).await?;
    info!("user {} requested membership in {}: {:?}", user_info, club_id, outcome);
    let resp = AddResponse {
        message: outcome.message(),
        status: outcome.status(),
        notifications: match outcome {
            RequestOutcome::Created(dispatch) => Some(dispatch),
            RequestOutcome::Existing(_) => None,
        },
    };
    Ok(HttpResponse::Created().json(resp))
}

pub async fn delete<D>(user_info: UserInfo, Json(member): Json<Member>, db: Data<D>) -> Result<Json<Message>, Error>
where
    D: Manager + 'static,
{
    let (student, club_id) = member.into_parts()?;
    let mut conn = db.acquire().await?;
    let outcome = membership::delete_membership(&mut conn, student, &club_id).await?;
    info!("user {} deleted membership in {}: {:?}", user_info, club_id, outcome);
    Ok(Json(Message::new(outcome.message())))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    #[serde(flatten)]
    member: Member,
    status: Option<String>,
}

pub async fn update_status<D>(user_info: UserInfo, Json(StatusUpdate { member, status }): Json<StatusUpdate>, db: Data<D>) -> Result<Json<Message>, Error>
where
    D: Manager + 'static,
{
    let (student, club_id) = member.into_parts()?;
    let status: MembershipStatus = required(status, "Invalid input. status is required.")?.parse()?;
    let mut tx = db.begin().await?;
    let outcome = membership::update_status(&mut tx, student, &club_id, status).await?;
    match outcome {
        UpdateOutcome::Updated(_) => tx.commit().await?,
        UpdateOutcome::NotFound => tx.rollback().await?,
    }
    info!("user {} updated membership in {}: {:?}", user_info, club_id, outcome);
    Ok(Json(Message::new(outcome.message())))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    club_id: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Serialize)]
struct Memberships {
    memberships: Vec<MembershipWithStudent>,
}

pub async fn list<D>(_: UserInfo, Query(ListParams { club_id, status }): Query<ListParams>, db: Data<D>) -> Result<HttpResponse, Error>
where
    D: Manager + 'static,
{
    let club_id = required(club_id, "club_id is required")?;
    let status = match status {
        Some(s) if !s.trim().is_empty() => Some(s.parse::<MembershipStatus>()?),
        _ => None,
    };
    let mut conn = db.acquire().await?;
    let memberships = membership::list_memberships(&mut conn, &club_id, status).await?;
    if memberships.is_empty() {
        return Ok(HttpResponse::Ok().json(Message::new("No memberships found for the specified club.")));
    }
    Ok(HttpResponse::Ok().json(Memberships { memberships }))
}
