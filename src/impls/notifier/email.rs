use crate::core::models::notification::Notice;
use crate::core::ports::{
    mailer::Mailer,
    notifier::{Channel, Notifier},
    repository::NotificationCommon,
};
use crate::error::Error;

pub struct EmailNotifier<M> {
    mailer: M,
}

impl<M> EmailNotifier<M>
where
    M: Mailer,
{
    pub fn new(mailer: M) -> Self {
        Self { mailer }
    }
}

impl<M> Notifier for EmailNotifier<M>
where
    M: Mailer,
{
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn notify<S>(&self, _: &mut S, recipient: &str, notice: &Notice) -> Result<(), Error>
    where
        S: NotificationCommon,
    {
        self.mailer.send(recipient, &notice.subject, &notice.body).await
    }
}
