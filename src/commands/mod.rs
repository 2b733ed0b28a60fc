//! Command dispatch and handlers.

pub mod check;
pub mod draw;
pub mod test_email;

use std::path::Path;

use tracing::{debug, info};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::cli::{Cli, Command};
use crate::context::ServiceContext;
use crate::letter::DEFAULT_TEMPLATE;
use crate::settings::{password, Settings};

/// Dispatch a parsed command to its handler.
///
/// Settings are loaded and validated once here; a `.env` file in the
/// working directory is loaded first so it can supply the SMTP password.
///
/// # Errors
///
/// Returns an error string if settings are invalid or the command fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!(path = %path.display(), "loaded environment file");
    }

    let settings = Settings::load(&LiveFileSystem, &cli.config).map_err(|e| e.to_string())?;
    let template = cli.template.as_deref();

    match &cli.command {
        Command::Draw { seed, send } => {
            let password = password::resolve_from_env(&settings.config.smtp.password, !*send)
                .map_err(|e| e.to_string())?;
            let ctx = if *send {
                info!(host = %settings.config.smtp.host, "live run, letters will be sent");
                ServiceContext::live(&settings, password)?
            } else {
                ServiceContext::dry_run()
            };
            draw::run_with_context(&ctx, &settings, template, *seed, *send)
        }
        Command::TestEmail => {
            let password = password::resolve_from_env(&settings.config.smtp.password, false)
                .map_err(|e| e.to_string())?;
            let ctx = ServiceContext::live(&settings, password)?;
            test_email::run_with_context(&ctx, &settings, template)
        }
        Command::Check => check::run_with_context(&ServiceContext::dry_run(), &settings, template),
    }
}

/// Reads the body template from `path`, or returns the built-in one.
fn load_template(ctx: &ServiceContext, path: Option<&Path>) -> Result<String, String> {
    let Some(path) = path else {
        return Ok(DEFAULT_TEMPLATE.to_string());
    };
    if !ctx.fs.exists(path) {
        return Err(format!("Template {} not found", path.display()));
    }
    ctx.fs
        .read_to_string(path)
        .map_err(|e| format!("Failed to read template {}: {e}", path.display()))
}
