//! `santa check` command.

use std::path::Path;

use super::load_template;
use crate::context::ServiceContext;
use crate::draw;
use crate::letter::LetterRenderer;
use crate::settings::Settings;

/// Execute the `check` command against the given context.
///
/// Confirms that a valid draw exists and that the templates render, without
/// drawing pairs or sending anything.
///
/// # Errors
///
/// Returns an error string if no valid draw exists or a template is broken.
pub fn run_with_context(
    ctx: &ServiceContext,
    settings: &Settings,
    template: Option<&Path>,
) -> Result<(), String> {
    println!("Settings validated successfully!");

    let (ids, exclusions) = settings.roster();
    draw::check_feasible(&ids, &exclusions).map_err(|e| format!("Draw not possible: {e}"))?;
    println!(
        "{} participants, {} excluded pairs: a valid draw exists",
        ids.len(),
        exclusions.len()
    );

    let body = load_template(ctx, template)?;
    let renderer = LetterRenderer::new(settings, &body).map_err(|e| e.to_string())?;
    let sample = settings.config.testing.clone();
    renderer.render(&sample, &sample).map_err(|e| e.to_string())?;
    println!("Templates render");
    Ok(())
}
