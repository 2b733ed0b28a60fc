//! SMTP password indirection through environment variables.
//!
//! `$NAME` reads the password from the `NAME` environment variable,
//! `\$literal` stands for a password that really starts with `$`, and any
//! other value is used as-is.

use tracing::warn;

use crate::error::SettingsError;

/// Resolves a configured password against `lookup`.
///
/// A missing variable is an error unless `dry_run` is set, in which case the
/// password resolves to an empty string since nothing will be sent.
///
/// # Errors
///
/// Returns [`SettingsError::MissingPasswordVar`] when the referenced
/// variable is unset outside dry-run.
pub fn resolve(
    raw: &str,
    dry_run: bool,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, SettingsError> {
    if let Some(escaped) = raw.strip_prefix("\\$") {
        return Ok(format!("${escaped}"));
    }

    let Some(var) = raw.strip_prefix('$') else {
        return Ok(raw.to_string());
    };

    match lookup(var) {
        Some(value) => Ok(value),
        None if dry_run => {
            warn!(var, "password variable not set, continuing without it in dry-run");
            Ok(String::new())
        }
        None => Err(SettingsError::MissingPasswordVar(var.to_string())),
    }
}

/// Resolves a configured password against the process environment.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_from_env(raw: &str, dry_run: bool) -> Result<String, SettingsError> {
    resolve(raw, dry_run, |name| std::env::var(name).ok())
}
