use log::info;

use crate::core::models::{
    membership::{DeleteOutcome, Insert, MembershipStatus, MembershipWithStudent, Query, RequestOutcome, StudentKey, UpdateOutcome},
    notification::Notice,
};
use crate::core::ports::{
    notifier::Notifier,
    repository::{MembershipCommon, StudentCommon, Store},
};
use crate::core::services::fanout::FanOut;
use crate::error::Error;

async fn resolve_student<S>(store: &mut S, student: StudentKey) -> Result<Option<String>, Error>
where
    S: Store,
{
    match student {
        StudentKey::Email(email) => Ok(Some(email)),
        StudentKey::Id(id) => StudentCommon::email_by_id(store, id).await,
    }
}

/// Files a join request. A pair that already has a membership only reports its status;
/// a fresh request is stored as `Pending` and the club's admins are notified.
pub async fn request_membership<S, I, E>(store: &mut S, fan_out: &FanOut<I, E>, student: StudentKey, club_id: &str) -> Result<RequestOutcome, Error>
where
    S: Store,
    I: Notifier,
    E: Notifier,
{
    let student_email = match resolve_student(store, student.clone()).await? {
        Some(email) => email,
        None => return Err(Error::BusinessError(format!("no student found with {}", student))),
    };
    let inserted = MembershipCommon::insert_if_absent(
        store,
        Insert {
            student_email: student_email.clone(),
            club_id: club_id.to_owned(),
            status: MembershipStatus::Pending,
        },
    )
    .await?;
    if inserted.is_none() {
        let status = MembershipCommon::status(store, &student_email, club_id)
            .await?
            .ok_or_else(|| Error::BusinessError("membership was removed while the request was processed, please retry".into()))?;
        return Ok(RequestOutcome::Existing(status));
    }
    info!("membership requested by {} for club {}", student_email, club_id);
    let dispatch = fan_out.dispatch(store, club_id, &Notice::membership_request(&student_email, club_id)).await;
    Ok(RequestOutcome::Created(dispatch))
}

pub async fn update_status<S>(store: &mut S, student: StudentKey, club_id: &str, status: MembershipStatus) -> Result<UpdateOutcome, Error>
where
    S: Store,
{
    let student_email = match resolve_student(store, student).await? {
        Some(email) => email,
        None => return Ok(UpdateOutcome::NotFound),
    };
    if MembershipCommon::status(store, &student_email, club_id).await?.is_none() {
        return Ok(UpdateOutcome::NotFound);
    }
    let updated = MembershipCommon::update_status(store, &student_email, club_id, status).await?;
    if updated == 0 {
        return Ok(UpdateOutcome::NotFound);
    }
    info!("membership of {} in club {} set to {}", student_email, club_id, status);
    Ok(UpdateOutcome::Updated(status))
}

pub async fn delete_membership<S>(store: &mut S, student: StudentKey, club_id: &str) -> Result<DeleteOutcome, Error>
where
    S: Store,
{
    let student_email = match resolve_student(store, student).await? {
        Some(email) => email,
        None => return Ok(DeleteOutcome::NotFound),
    };
    let deleted = MembershipCommon::delete(store, &student_email, club_id).await?;
    if deleted == 0 {
        return Ok(DeleteOutcome::NotFound);
    }
    info!("membership of {} in club {} deleted", student_email, club_id);
    Ok(DeleteOutcome::Deleted)
}

pub async fn list_memberships<S>(store: &mut S, club_id: &str, status: Option<MembershipStatus>) -> Result<Vec<MembershipWithStudent>, Error>
where
    S: Store,
{
    MembershipCommon::query(
        store,
        &Query {
            club_id_eq: Some(club_id.to_owned()),
            status_eq: status,
        },
    )
    .await
}
