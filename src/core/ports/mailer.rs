use crate::error::Error;

/// Outbound email delivery.
pub trait Mailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), Error>;
}
