//! `santa draw` command.

use std::path::Path;

use tracing::{info, warn};

use super::load_template;
use crate::context::ServiceContext;
use crate::draw::{Assignment, Drawer};
use crate::letter::LetterRenderer;
use crate::ports::Letter;
use crate::settings::Settings;

/// Execute the `draw` command against the given context.
///
/// Every letter is rendered before the first one is handed to the mailer,
/// so a bad template or draw never results in a partial mailing.
///
/// # Errors
///
/// Returns an error string if the draw is impossible, a letter fails to
/// render, or the mailer rejects a letter.
pub fn run_with_context(
    ctx: &ServiceContext,
    settings: &Settings,
    template: Option<&Path>,
    seed: Option<u64>,
    send: bool,
) -> Result<(), String> {
    let (ids, exclusions) = settings.roster();
    let assignment = Drawer::new(settings.config.max_attempts)
        .draw(&ids, &exclusions, seed)
        .map_err(|e| format!("Draw failed: {e}"))?;
    info!(participants = assignment.len(), "assignment drawn");

    let body = load_template(ctx, template)?;
    let renderer = LetterRenderer::new(settings, &body).map_err(|e| e.to_string())?;
    let letters = render_letters(settings, &assignment, &renderer)?;

    let total = letters.len();
    for (sent, letter) in letters.iter().enumerate() {
        ctx.mailer.send(letter).map_err(|e| {
            warn!(sent, total, "aborting after mailer failure");
            format!("Failed to send letter to {} ({sent} of {total} sent): {e}", letter.to_email)
        })?;
        if send {
            println!("Sending e-mail to {:<30}[OK]", letter.to_email);
            info!(to = %letter.to_email, "letter sent");
        }
    }

    println!();
    println!("Finished!");
    Ok(())
}

fn render_letters(
    settings: &Settings,
    assignment: &Assignment,
    renderer: &LetterRenderer<'_>,
) -> Result<Vec<Letter>, String> {
    assignment
        .iter()
        .map(|pairing| {
            let giver = settings
                .participant(&pairing.giver)
                .ok_or_else(|| format!("Unknown giver {}", pairing.giver))?;
            let recipient = settings
                .participant(&pairing.recipient)
                .ok_or_else(|| format!("Unknown recipient {}", pairing.recipient))?;
            renderer.render(&giver.contact(), &recipient.contact()).map_err(|e| e.to_string())
        })
        .collect()
}
