//! Letter rendering.
//!
//! Uses Handlebars in strict mode with HTML escaping turned off, since
//! letters are sent as plain text. The subject and the body are both
//! templates over the same data:
//!
//! - `sender`: the SMTP account letters come from
//! - `subject`: the rendered subject (body only)
//! - `giver` / `recipient`: `{ name, email }`
//! - `limit_dollars`, `opening_day` and any extra `rules` keys

use handlebars::Handlebars;
use serde_json::{json, Map, Value};

use crate::error::LetterError;
use crate::ports::Letter;
use crate::settings::{Contact, Settings};

/// Template used when no `--template` file is given.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/email_template.hbs");

const SUBJECT: &str = "subject";
const BODY: &str = "body";

/// Compiled subject and body templates plus the event data shared by every letter.
pub struct LetterRenderer<'a> {
    handlebars: Handlebars<'a>,
    sender: String,
    event: Map<String, Value>,
}

impl LetterRenderer<'_> {
    /// Compiles the subject from `settings` and the given body template.
    ///
    /// # Errors
    ///
    /// Returns an error if either template does not compile or the event
    /// rules cannot be turned into template data.
    pub fn new(settings: &Settings, body_template: &str) -> Result<Self, LetterError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_template_string(SUBJECT, &settings.config.email_subject)
            .map_err(|e| LetterError::Template { name: SUBJECT, source: Box::new(e) })?;
        handlebars
            .register_template_string(BODY, body_template)
            .map_err(|e| LetterError::Template { name: BODY, source: Box::new(e) })?;

        let mut event = match serde_json::to_value(&settings.rules)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        // "25" rather than "25.0" for whole amounts
        let limit = settings.rules.limit_dollars;
        if limit.fract() == 0.0 && limit.abs() < 1e15 {
            #[allow(clippy::cast_possible_truncation)]
            let whole = limit as i64;
            event.insert("limit_dollars".to_string(), json!(whole));
        }

        Ok(Self { handlebars, sender: settings.config.smtp.user.clone(), event })
    }

    /// Renders the letter telling `giver` who they are buying for.
    ///
    /// # Errors
    ///
    /// Returns an error if a template references data that does not exist.
    pub fn render(&self, giver: &Contact, recipient: &Contact) -> Result<Letter, LetterError> {
        let mut data = self.event.clone();
        data.insert("sender".to_string(), json!(self.sender));
        data.insert("giver".to_string(), json!({ "name": giver.name, "email": giver.email }));
        data.insert(
            "recipient".to_string(),
            json!({ "name": recipient.name, "email": recipient.email }),
        );

        let render_err = |name: &'static str| {
            let giver = giver.name.clone();
            move |e| LetterError::Render { name, giver, source: Box::new(e) }
        };

        let subject = self.handlebars.render(SUBJECT, &data).map_err(render_err(SUBJECT))?;
        data.insert(SUBJECT.to_string(), json!(subject));
        let body = self.handlebars.render(BODY, &data).map_err(render_err(BODY))?;

        Ok(Letter {
            from: self.sender.clone(),
            to_name: giver.name.clone(),
            to_email: giver.email.clone(),
            subject: subject.trim().to_string(),
            body,
        })
    }
}
