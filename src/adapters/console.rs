//! Dry-run adapter for the `Mailer` port that prints letters instead of sending them.

use std::io::{Stdout, Write};
use std::sync::Mutex;

use crate::ports::mailer::{Letter, Mailer};

const RULE: &str = "----------------------------------------------------------------";

/// Writes each letter, headers first, to an output stream.
pub struct ConsoleMailer<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleMailer<Stdout> {
    /// Creates a console mailer printing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleMailer<W> {
    /// Creates a console mailer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    /// Returns the underlying writer.
    ///
    /// # Panics
    ///
    /// Panics if a previous write panicked while holding the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().expect("console writer lock poisoned")
    }
}

impl<W: Write + Send> Mailer for ConsoleMailer<W> {
    fn send(&self, letter: &Letter) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut out = self.out.lock().expect("console writer lock poisoned");
        writeln!(out, "From: {}", letter.from)?;
        writeln!(out, "To: {} <{}>", letter.to_name, letter.to_email)?;
        writeln!(out, "Subject: {}", letter.subject)?;
        writeln!(out)?;
        writeln!(out, "{}", letter.body.trim_end())?;
        writeln!(out, "{RULE}")?;
        out.flush()?;
        Ok(())
    }
}
