//! Live adapter for the `Mailer` port using SMTP over implicit TLS.

use std::thread;
use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::debug;

use crate::ports::mailer::{Letter, Mailer};
use crate::settings::SmtpSettings;

/// Sends letters through an SMTP relay.
///
/// Each send is followed by a fixed pause so a batch does not trip the
/// server's rate limits.
pub struct SmtpMailer {
    transport: SmtpTransport,
    pause: Duration,
}

impl SmtpMailer {
    /// Creates a mailer for the configured relay, logging in as `smtp.user`.
    ///
    /// No connection is made until the first letter is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS parameters for `smtp.host` cannot be built.
    pub fn new(
        smtp: &SmtpSettings,
        password: String,
        pause: Duration,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let transport = SmtpTransport::relay(&smtp.host)?
            .port(smtp.port)
            .credentials(Credentials::new(smtp.user.clone(), password))
            .build();
        Ok(Self { transport, pause })
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, letter: &Letter) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let message = build_message(letter)?;
        let response = self.transport.send(&message)?;
        debug!(to = %letter.to_email, code = %response.code(), "smtp accepted letter");
        if !self.pause.is_zero() {
            thread::sleep(self.pause);
        }
        Ok(())
    }
}

/// Builds a plain-text message from a rendered letter.
fn build_message(letter: &Letter) -> Result<Message, Box<dyn std::error::Error + Send + Sync>> {
    let from: Mailbox = letter.from.parse()?;
    let to = Mailbox::new(Some(letter.to_name.clone()), letter.to_email.parse()?);
    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(letter.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(letter.body.clone())?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter() -> Letter {
        Letter {
            from: "santa@example.com".to_string(),
            to_name: "Alice".to_string(),
            to_email: "alice@example.com".to_string(),
            subject: "Your match".to_string(),
            body: "You are buying for Bob.".to_string(),
        }
    }

    #[test]
    fn builds_plain_text_message() {
        let message = build_message(&letter()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("From: santa@example.com"));
        assert!(raw.contains("alice@example.com"));
        assert!(raw.contains("Subject: Your match"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("You are buying for Bob."));
    }

    #[test]
    fn rejects_bad_recipient_address() {
        let mut bad = letter();
        bad.to_email = "alice".to_string();
        assert!(build_message(&bad).is_err());
    }
}
