//! `santa test-email` command.

use std::path::Path;

use tracing::info;

use super::load_template;
use crate::context::ServiceContext;
use crate::letter::LetterRenderer;
use crate::settings::{Contact, Settings};

/// Execute the `test-email` command against the given context.
///
/// Sends a single letter to the testing address, with the tester playing
/// both the giver and the recipient.
///
/// # Errors
///
/// Returns an error string if the letter fails to render or send.
pub fn run_with_context(
    ctx: &ServiceContext,
    settings: &Settings,
    template: Option<&Path>,
) -> Result<(), String> {
    let tester = &settings.config.testing;
    let giver = Contact { name: format!("{} (giver)", tester.name), email: tester.email.clone() };
    let recipient =
        Contact { name: format!("{} (receiver)", tester.name), email: tester.email.clone() };

    let body = load_template(ctx, template)?;
    let renderer = LetterRenderer::new(settings, &body).map_err(|e| e.to_string())?;
    let letter = renderer.render(&giver, &recipient).map_err(|e| e.to_string())?;

    println!("E-mail testing mode, sending one letter to {}...", tester.email);
    ctx.mailer
        .send(&letter)
        .map_err(|e| format!("Failed to send test letter to {}: {e}", tester.email))?;
    info!(to = %tester.email, "test letter sent");
    println!("Test e-mail sent");
    Ok(())
}
