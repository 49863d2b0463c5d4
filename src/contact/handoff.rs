use thiserror::Error;

use super::compose::OutboundMessage;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("could not open the mail composer: {0}")]
    Launch(#[from] std::io::Error),
}

/// Delivers a message to whatever composes mail on this machine.
///
/// Fire-and-forget: `Ok` only means the handoff was started.
pub trait Handoff {
    fn hand_off(&self, message: &OutboundMessage) -> Result<(), HandoffError>;
}

/// Opens the message as a `mailto:` URL with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct MailtoHandoff;

impl Handoff for MailtoHandoff {
    fn hand_off(&self, message: &OutboundMessage) -> Result<(), HandoffError> {
        tracing::info!(recipient = %message.recipient, subject = %message.subject, "handing off message");
        open::that_detached(message.mailto_url())?;
        Ok(())
    }
}
