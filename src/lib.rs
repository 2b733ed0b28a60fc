//! Core library entry for the `santa` CLI.
//!
//! Draws a Secret Santa assignment (a derangement of the participants that
//! honours exclusion pairs) and mails every giver the name of their
//! recipient.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod context;
pub mod draw;
pub mod error;
pub mod letter;
pub mod ports;
pub mod settings;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().map_err(|e| e.to_string());
        }
        Err(err) => return Err(err.to_string()),
    };
    init_tracing(&cli.log_level);
    commands::dispatch(&cli)
}

/// Installs the stderr log subscriber; later calls are no-ops.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
