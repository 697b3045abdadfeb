use crate::core::ports::mailer::Mailer;
use crate::error::Error;

/// Mailer that writes every message to the log instead of handing it to a mail server.
pub struct LogMailer {
    sender: String,
}

impl LogMailer {
    pub fn new(sender: &str) -> Self {
        Self { sender: sender.to_owned() }
    }
}

impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), Error> {
        if to.trim().is_empty() {
            return Err(Error::MailError("empty recipient".into()));
        }
        log::info!("mail from {} to {} | {} | {}", self.sender, to, subject, body.replace('\n', " "));
        Ok(())
    }
}
