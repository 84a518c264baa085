//! Notification collaborators: delivery, templating, and address checks.
//! Used by: cli. The token codec never calls into this module.

pub mod address;
pub mod template;

pub use address::is_valid_email;
pub use template::{load_template, PositionalRenderer, TemplateRenderer};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

pub trait Notifier {
    fn send(&self, recipient: &str, body_html: &str, subject: &str) -> Result<(), TransportError>;
}

/// Checks the address, renders the template, then hands off to `notifier`.
pub fn send_templated(
    notifier: &dyn Notifier,
    renderer: &dyn TemplateRenderer,
    recipient: &str,
    subject: &str,
    template: &str,
    values: &[&str],
) -> Result<(), TransportError> {
    if !is_valid_email(recipient) {
        return Err(TransportError::InvalidRecipient(recipient.to_owned()));
    }
    let body = renderer.render(template, values);
    notifier.send(recipient, &body, subject)?;
    tracing::info!(recipient, subject, "notification sent");
    Ok(())
}
