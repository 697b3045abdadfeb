use log::{error, info, warn};

use crate::core::models::{membership::Dispatch, notification::Notice};
use crate::core::ports::{
    notifier::Notifier,
    repository::{AdminCommon, NotificationCommon},
};

/// Broadcasts a notice to every admin of a club over both notification channels.
///
/// Each admin gets an email and an in-app notification, in that order. A failed
/// attempt is logged and counted; it never stops the next attempt and is never retried.
pub struct FanOut<I, E> {
    inbox: I,
    email: E,
    include_inactive: bool,
}

impl<I, E> FanOut<I, E>
where
    I: Notifier,
    E: Notifier,
{
    pub fn new(inbox: I, email: E, include_inactive: bool) -> Self {
        Self { inbox, email, include_inactive }
    }

    pub async fn dispatch<S>(&self, store: &mut S, club_id: &str, notice: &Notice) -> Dispatch
    where
        S: AdminCommon + NotificationCommon,
    {
        let mut dispatch = Dispatch::default();
        let admins = match AdminCommon::list_by_club(store, club_id).await {
            Ok(admins) => admins,
            Err(e) => {
                error!("failed to look up admins of club {}: {}", club_id, e);
                dispatch.lookup_failed = true;
                return dispatch;
            }
        };
        if admins.is_empty() {
            info!("club {} has no admins to notify", club_id);
        }
        for admin in admins {
            if !admin.is_active {
                if !self.include_inactive {
                    info!("skipping inactive admin {} of club {}", admin.email, club_id);
                    dispatch.skipped += 1;
                    continue;
                }
                warn!("notifying inactive admin {} of club {}", admin.email, club_id);
            }
            dispatch.recipients += 1;
            let email = self.email.notify(store, &admin.email, notice).await;
            self.record(&mut dispatch, &self.email, &admin.email, email);
            let inbox = self.inbox.notify(store, &admin.email, notice).await;
            self.record(&mut dispatch, &self.inbox, &admin.email, inbox);
        }
        dispatch
    }

    #[cfg(test)]
    pub(crate) fn inbox(&self) -> &I {
        &self.inbox
    }

    #[cfg(test)]
    pub(crate) fn email(&self) -> &E {
        &self.email
    }

    fn record<N: Notifier>(&self, dispatch: &mut Dispatch, notifier: &N, recipient: &str, res: Result<(), crate::error::Error>) {
        dispatch.attempted += 1;
        if let Err(e) = res {
            dispatch.failed += 1;
            warn!("{:?} notification to {} failed: {}", notifier.channel(), recipient, e);
        }
    }
}
