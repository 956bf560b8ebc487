use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, RawPhoneNumber, SendAt, SenderId};

#[derive(Debug, Clone)]
/// A single outbound SMS, provider-agnostic.
///
/// The destination is kept raw; each adapter applies its own normalization
/// rule right before hitting the wire. `from` falls back to the configured
/// per-provider default sender when absent. `send_at` is honored by Aqilas
/// only and ignored by Twilio.
pub struct SendRequest {
    to: RawPhoneNumber,
    message: MessageText,
    from: Option<SenderId>,
    send_at: Option<SendAt>,
}

impl SendRequest {
    /// Build a request from raw strings, validating non-emptiness.
    pub fn new(
        to: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            to: RawPhoneNumber::new(to)?,
            message: MessageText::new(message)?,
            from: None,
            send_at: None,
        })
    }

    /// Override the sender id for this message.
    pub fn with_from(mut self, from: impl Into<String>) -> Result<Self, ValidationError> {
        self.from = Some(SenderId::new(from)?);
        Ok(self)
    }

    /// Schedule the send (Aqilas-only semantics; passed through verbatim).
    pub fn with_send_at(mut self, send_at: impl Into<String>) -> Result<Self, ValidationError> {
        self.send_at = Some(SendAt::new(send_at)?);
        Ok(self)
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn from(&self) -> Option<&SenderId> {
        self.from.as_ref()
    }

    pub fn send_at(&self) -> Option<&SendAt> {
        self.send_at.as_ref()
    }
}
