//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `santa`.
#[derive(Debug, Parser)]
#[command(name = "santa", version, about = "Draw Secret Santa pairs and email everyone their match")]
pub struct Cli {
    /// Path to the settings file.
    #[arg(short, long, global = true, default_value = "settings.yml")]
    pub config: PathBuf,

    /// Handlebars template for the letter body (built-in template when omitted).
    #[arg(short, long, global = true)]
    pub template: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Draw pairs and print every letter, or send them with `--send`.
    Draw {
        /// Seed for the draw; the same seed and settings reproduce the same pairs.
        #[arg(long)]
        seed: Option<u64>,
        /// Send letters over SMTP instead of printing them.
        #[arg(long, visible_alias = "no-dry-run")]
        send: bool,
    },
    /// Send one sample letter to the configured testing address.
    TestEmail,
    /// Validate settings and confirm a draw is possible, without drawing.
    Check,
}
