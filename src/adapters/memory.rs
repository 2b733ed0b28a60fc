//! In-memory adapters for driving commands without disk or network.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::ports::filesystem::FileSystem;
use crate::ports::mailer::{Letter, Mailer};

/// Filesystem backed by a fixed map of paths to contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any previous contents at `path`.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.files.insert(path.into(), contents.to_string());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("{}: no such file", path.display()).into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// Mailer that keeps every letter it is handed.
///
/// Clones share the same mailbox, so a test can keep one handle while a
/// `ServiceContext` owns another.
#[derive(Debug, Clone, Default)]
pub struct CapturingMailer {
    sent: Arc<Mutex<Vec<Letter>>>,
    fail_after: Option<usize>,
}

impl CapturingMailer {
    /// Creates a mailer that accepts every letter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailer that accepts `count` letters and rejects the rest.
    #[must_use]
    pub fn failing_after(count: usize) -> Self {
        Self { fail_after: Some(count), ..Self::default() }
    }

    /// Returns the letters accepted so far, in send order.
    ///
    /// # Panics
    ///
    /// Panics if a sender panicked while holding the mailbox.
    #[must_use]
    pub fn letters(&self) -> Vec<Letter> {
        self.sent.lock().expect("mailbox lock poisoned").clone()
    }
}

impl Mailer for CapturingMailer {
    fn send(&self, letter: &Letter) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut sent = self.sent.lock().expect("mailbox lock poisoned");
        if self.fail_after.is_some_and(|limit| sent.len() >= limit) {
            return Err(format!("mailbox refused letter to {}", letter.to_email).into());
        }
        sent.push(letter.clone());
        Ok(())
    }
}
