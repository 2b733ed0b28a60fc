//! Service context bundling the port trait objects.

use std::time::Duration;

use crate::adapters::console::ConsoleMailer;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::smtp::SmtpMailer;
use crate::ports::filesystem::FileSystem;
use crate::ports::mailer::Mailer;
use crate::settings::Settings;

/// Bundles the port trait objects a command runs against.
///
/// Constructors wire up different adapters: printing letters (dry-run),
/// sending them over SMTP (live), or anything a test supplies.
pub struct ServiceContext {
    /// Filesystem for settings and templates.
    pub fs: Box<dyn FileSystem>,
    /// Where rendered letters go.
    pub mailer: Box<dyn Mailer>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, mailer: Box<dyn Mailer>) -> Self {
        Self { fs, mailer }
    }

    /// Creates a dry-run context that prints letters to stdout.
    #[must_use]
    pub fn dry_run() -> Self {
        Self::new(Box::new(LiveFileSystem), Box::new(ConsoleMailer::stdout()))
    }

    /// Creates a live context that sends letters through the configured SMTP relay.
    ///
    /// `password` is the already-resolved SMTP password.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be configured.
    pub fn live(settings: &Settings, password: String) -> Result<Self, String> {
        let pause = Duration::from_millis(settings.config.send_delay_ms);
        let mailer = SmtpMailer::new(&settings.config.smtp, password, pause).map_err(|e| {
            format!("Failed to configure SMTP relay {}: {e}", settings.config.smtp.host)
        })?;
        Ok(Self::new(Box::new(LiveFileSystem), Box::new(mailer)))
    }
}
