//! Error types for the draw, settings, and letter layers.

use thiserror::Error;

/// Failures from the derangement generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// The input violates a precondition of the generator.
    #[error("invalid draw input: {0}")]
    InvalidInput(String),

    /// No valid assignment exists, or none was found within the attempt cap.
    ///
    /// `attempts` is zero when the upfront feasibility check already proved
    /// that no assignment exists.
    #[error(
        "no valid assignment for {participants} participants under the given exclusions \
         (gave up after {attempts} attempts)"
    )]
    ConstraintUnsatisfiable {
        /// Number of participants in the draw.
        participants: usize,
        /// Shuffles tried before giving up.
        attempts: u32,
    },
}

/// Failures while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying I/O failure.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The settings file is not valid YAML for the expected schema.
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: String,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// The settings parsed but break one or more rules.
    #[error("invalid settings:\n{}", format_problems(.problems))]
    Invalid {
        /// Every problem found, in file order.
        problems: Vec<String>,
    },

    /// The SMTP password refers to an environment variable that is not set.
    #[error("environment variable {0} (referenced by smtp.password) is not set")]
    MissingPasswordVar(String),
}

fn format_problems(problems: &[String]) -> String {
    problems.iter().map(|p| format!("  - {p}")).collect::<Vec<_>>().join("\n")
}

/// Failures while rendering a letter template.
#[derive(Debug, Error)]
pub enum LetterError {
    /// The template source does not compile.
    #[error("invalid {name} template: {source}")]
    Template {
        /// Which template failed (`subject` or `body`).
        name: &'static str,
        /// Underlying Handlebars error.
        source: Box<handlebars::TemplateError>,
    },

    /// The template compiled but could not be rendered with the letter data.
    #[error("failed to render {name} for {giver}: {source}")]
    Render {
        /// Which template failed (`subject` or `body`).
        name: &'static str,
        /// Giver the letter was addressed to.
        giver: String,
        /// Underlying Handlebars error.
        source: Box<handlebars::RenderError>,
    },

    /// Event metadata could not be converted into template data.
    #[error("failed to build template data: {0}")]
    Data(#[from] serde_json::Error),
}
