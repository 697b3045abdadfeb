use crate::core::models::notification::{Insert, Notification, Query, ReadFilter};
use crate::core::ports::repository::{NotificationCommon, Store};
use crate::error::Error;

pub async fn add_notification<S>(store: &mut S, admin_email: String, notification: String) -> Result<i32, Error>
where
    S: Store,
{
    NotificationCommon::insert(store, Insert { admin_email, notification }).await
}

pub async fn notifications<S>(store: &mut S, admin_email: &str, filter: ReadFilter) -> Result<Vec<Notification>, Error>
where
    S: Store,
{
    NotificationCommon::query(
        store,
        &Query {
            admin_email_eq: Some(admin_email.to_owned()),
            is_read_eq: filter.is_read(),
        },
    )
    .await
}

pub async fn unread_count<S>(store: &mut S, admin_email: &str) -> Result<i64, Error>
where
    S: Store,
{
    NotificationCommon::count(
        store,
        &Query {
            admin_email_eq: Some(admin_email.to_owned()),
            is_read_eq: Some(false),
        },
    )
    .await
}

/// Marks one notification, or every unread one when `id` is `None`, as read.
pub async fn mark_as_read<S>(store: &mut S, admin_email: &str, id: Option<i32>) -> Result<u64, Error>
where
    S: Store,
{
    NotificationCommon::mark_read(store, admin_email, id).await
}
