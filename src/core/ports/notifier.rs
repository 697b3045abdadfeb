use crate::core::models::notification::Notice;
use crate::core::ports::repository::NotificationCommon;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    InApp,
    Email,
}

/// One delivery channel of the admin notification sink. `store` is the caller's
/// request-scoped store; channels that persist write through it.
pub trait Notifier {
    fn channel(&self) -> Channel;
    async fn notify<S>(&self, store: &mut S, recipient: &str, notice: &Notice) -> Result<(), Error>
    where
        S: NotificationCommon;
}
