//! Draw settings: SMTP account, event rules, participants and exclusions.
//!
//! Settings are read once per run from a YAML file through the
//! `FileSystem` port, validated as a whole, and passed explicitly to the
//! commands that need them.

pub mod password;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use lettre::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::draw::{ExclusionSet, DEFAULT_MAX_ATTEMPTS};
use crate::error::SettingsError;
use crate::ports::FileSystem;

/// Top-level settings document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Delivery configuration.
    pub config: MailConfig,
    /// Event rules shown in every letter.
    pub rules: Rules,
    /// Everyone taking part in the draw.
    pub participants: Vec<Participant>,
    /// Pairs that must never be drawn.
    #[serde(default)]
    pub exclusions: Vec<Exclusion>,
}

/// Email delivery configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MailConfig {
    /// Subject line; a Handlebars template over the letter data.
    pub email_subject: String,
    /// Outgoing mail server.
    pub smtp: SmtpSettings,
    /// Recipient of `santa test-email`.
    pub testing: Contact,
    /// Pause between live sends, in milliseconds.
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,
    /// Cap on rejected shuffles per draw.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_send_delay_ms() -> u64 {
    1000
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

/// SMTP account used to send letters.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmtpSettings {
    /// Server host name.
    pub host: String,
    /// Server port (implicit TLS).
    pub port: u16,
    /// Login and sender address.
    pub user: String,
    /// Password, or `$VAR` to read it from the environment.
    pub password: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A name and email address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Event metadata passed through to templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Spending limit per gift.
    pub limit_dollars: f64,
    /// Day the gifts are opened.
    pub opening_day: NaiveDate,
    /// Any further event fields, available to templates by name.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// One person taking part in the draw.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Participant {
    /// Identifier used by exclusions; defaults to `name`.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Email address letters are sent to.
    pub email: String,
}

impl Participant {
    /// Returns the identifier this participant is known by.
    #[must_use]
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Returns the participant as a plain contact.
    #[must_use]
    pub fn contact(&self) -> Contact {
        Contact { name: self.name.clone(), email: self.email.clone() }
    }
}

/// A forbidden pairing between two participant identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Exclusion {
    /// Identifier of the giver.
    pub giver: String,
    /// Identifier of the recipient `giver` must not draw.
    pub recipient: String,
    /// Also forbid `recipient` from drawing `giver`.
    #[serde(default)]
    pub mutual: bool,
}

impl Settings {
    /// Reads, parses and validates settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// breaks any validation rule (all problems are reported together).
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, SettingsError> {
        let shown = path.display().to_string();
        let contents = fs
            .read_to_string(path)
            .map_err(|source| SettingsError::Read { path: shown.clone(), source })?;
        let settings = Self::from_yaml(&contents)
            .map_err(|source| SettingsError::Parse { path: shown, source })?;

        let problems = settings.validate();
        if !problems.is_empty() {
            return Err(SettingsError::Invalid { problems });
        }
        debug!(
            path = %path.display(),
            participants = settings.participants.len(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Parses settings from YAML without validating them.
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the document does not match the schema.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Checks every rule and returns a description of each violation.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.config.email_subject.trim().is_empty() {
            problems.push("config.email_subject is empty".to_string());
        }
        if self.config.smtp.host.trim().is_empty() {
            problems.push("config.smtp.host is empty".to_string());
        }
        check_email(&mut problems, "config.smtp.user", &self.config.smtp.user);
        check_name(&mut problems, "config.testing.name", &self.config.testing.name);
        check_email(&mut problems, "config.testing.email", &self.config.testing.email);
        if self.config.max_attempts == 0 {
            problems.push("config.max_attempts must be at least 1".to_string());
        }

        if !(self.rules.limit_dollars.is_finite() && self.rules.limit_dollars > 0.0) {
            problems.push(format!(
                "rules.limit_dollars must be positive, got {}",
                self.rules.limit_dollars
            ));
        }

        if self.participants.len() < 2 {
            problems.push(format!(
                "at least two participants are needed, found {}",
                self.participants.len()
            ));
        }

        let mut keys = HashSet::new();
        for (i, participant) in self.participants.iter().enumerate() {
            let field = format!("participants[{i}]");
            check_name(&mut problems, &format!("{field}.name"), &participant.name);
            check_email(&mut problems, &format!("{field}.email"), &participant.email);
            if !keys.insert(participant.key()) {
                problems.push(format!("{field}: duplicate participant id {}", participant.key()));
            }
        }

        for (i, exclusion) in self.exclusions.iter().enumerate() {
            let field = format!("exclusions[{i}]");
            for id in [&exclusion.giver, &exclusion.recipient] {
                if !keys.contains(id.as_str()) {
                    problems.push(format!("{field}: unknown participant {id}"));
                }
            }
            if exclusion.giver == exclusion.recipient {
                problems.push(format!("{field}: {} is excluded from themselves", exclusion.giver));
            }
        }

        problems
    }

    /// Returns participant identifiers in file order and the exclusion set.
    #[must_use]
    pub fn roster(&self) -> (Vec<String>, ExclusionSet) {
        let ids = self.participants.iter().map(|p| p.key().to_string()).collect();
        let mut exclusions = ExclusionSet::new();
        for exclusion in &self.exclusions {
            if exclusion.mutual {
                exclusions.insert_mutual(exclusion.giver.clone(), exclusion.recipient.clone());
            } else {
                exclusions.insert(exclusion.giver.clone(), exclusion.recipient.clone());
            }
        }
        (ids, exclusions)
    }

    /// Looks up a participant by identifier.
    #[must_use]
    pub fn participant(&self, key: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.key() == key)
    }
}

fn check_name(problems: &mut Vec<String>, field: &str, name: &str) {
    if name.trim().is_empty() {
        problems.push(format!("{field} is empty"));
    }
}

fn check_email(problems: &mut Vec<String>, field: &str, email: &str) {
    if let Err(e) = email.parse::<Address>() {
        problems.push(format!("{field}: invalid email address {email:?} ({e})"));
    }
}
