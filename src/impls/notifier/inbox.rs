use crate::core::models::notification::{Insert, Notice};
use crate::core::ports::{
    notifier::{Channel, Notifier},
    repository::NotificationCommon,
};
use crate::error::Error;

/// Persists notices to the admin's in-app inbox on the caller's store, so a
/// request never holds more than one pooled connection.
pub struct InboxNotifier;

impl Notifier for InboxNotifier {
    fn channel(&self) -> Channel {
        Channel::InApp
    }

    async fn notify<S>(&self, store: &mut S, recipient: &str, notice: &Notice) -> Result<(), Error>
    where
        S: NotificationCommon,
    {
        NotificationCommon::insert(
            store,
            Insert {
                admin_email: recipient.to_owned(),
                notification: notice.summary.clone(),
            },
        )
        .await?;
        Ok(())
    }
}
