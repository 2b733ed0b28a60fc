//! Mailer port for delivering rendered letters.

/// A fully rendered email, ready to hand to a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    /// Sender address.
    pub from: String,
    /// Display name of the addressee.
    pub to_name: String,
    /// Address the letter is delivered to.
    pub to_email: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Delivers letters.
///
/// Live delivery goes over SMTP; dry-run delivery prints the letter; tests
/// capture letters in memory.
pub trait Mailer: Send + Sync {
    /// Delivers one letter.
    ///
    /// # Errors
    ///
    /// Returns an error if the letter cannot be built or delivered.
    fn send(&self, letter: &Letter) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
