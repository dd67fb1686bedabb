use crate::domain::model::{EmailMessage, Participant};
use crate::utils::error::Result;
use regex::{Captures, Regex};

pub const DEFAULT_SUBJECT: &str = "Your Secret Santa 🎁";

pub const DEFAULT_BODY: &str = "Hi {giver.name},

Your Secret Santa is: {receiver.name}.
Email: {receiver.email}

🎄 Happy gifting!";

/// Fills `{giver.name}`, `{giver.email}`, `{receiver.name}` and
/// `{receiver.email}` placeholders in session templates. Anything else in
/// braces passes through untouched.
pub struct TemplateRenderer {
    placeholder: Regex,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            placeholder: Regex::new(r"\{(giver|receiver)\.(name|email)\}")?,
        })
    }

    pub fn render(&self, template: &str, giver: &Participant, receiver: &Participant) -> String {
        self.placeholder
            .replace_all(template, |caps: &Captures| {
                let side = if &caps[1] == "giver" { giver } else { receiver };
                match &caps[2] {
                    "name" => side.name.clone(),
                    _ => side.email.clone(),
                }
            })
            .into_owned()
    }

    /// Renders the full per-giver notification. The body is trimmed; the
    /// subject is used as-is.
    pub fn compose(
        &self,
        subject_template: &str,
        body_template: &str,
        sender: &str,
        giver: &Participant,
        receiver: &Participant,
    ) -> EmailMessage {
        EmailMessage {
            to: giver.email.clone(),
            from: sender.to_string(),
            subject: self.render(subject_template, giver, receiver),
            body: self.render(body_template, giver, receiver).trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Participant, Participant) {
        (
            Participant::new("a", "Alice", "alice@example.com", Vec::<String>::new()),
            Participant::new("b", "Bob", "bob@example.com", Vec::<String>::new()),
        )
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let (giver, receiver) = pair();
        let renderer = TemplateRenderer::new().unwrap();

        let out = renderer.render(
            "{giver.name} <{giver.email}> gives to {receiver.name} <{receiver.email}>",
            &giver,
            &receiver,
        );
        assert_eq!(out, "Alice <alice@example.com> gives to Bob <bob@example.com>");
    }

    #[test]
    fn test_render_substitutes_repeated_placeholders() {
        let (giver, receiver) = pair();
        let renderer = TemplateRenderer::new().unwrap();

        let out = renderer.render("{receiver.name} {receiver.name}", &giver, &receiver);
        assert_eq!(out, "Bob Bob");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders_alone() {
        let (giver, receiver) = pair();
        let renderer = TemplateRenderer::new().unwrap();

        let out = renderer.render("{giver.name} {budget} {giver.address}", &giver, &receiver);
        assert_eq!(out, "Alice {budget} {giver.address}");
    }

    #[test]
    fn test_default_body_renders_for_the_giver() {
        let (giver, receiver) = pair();
        let renderer = TemplateRenderer::new().unwrap();

        let message = renderer.compose(
            DEFAULT_SUBJECT,
            DEFAULT_BODY,
            "santa@example.com",
            &giver,
            &receiver,
        );
        assert_eq!(message.to, "alice@example.com");
        assert_eq!(message.from, "santa@example.com");
        assert_eq!(message.subject, DEFAULT_SUBJECT);
        assert!(message.body.starts_with("Hi Alice,"));
        assert!(message.body.contains("Your Secret Santa is: Bob."));
        assert!(message.body.contains("bob@example.com"));
        assert!(!message.body.ends_with('\n'));
    }

    #[test]
    fn test_compose_trims_body_but_not_subject() {
        let (giver, receiver) = pair();
        let renderer = TemplateRenderer::new().unwrap();

        let message = renderer.compose(
            "  {giver.name}  ",
            "\n\nbody for {receiver.name}\n\n",
            "santa@example.com",
            &giver,
            &receiver,
        );
        assert_eq!(message.subject, "  Alice  ");
        assert_eq!(message.body, "body for Bob");
    }
}
