use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A recipient phone number as provided by the caller.
///
/// Invariant: non-empty after trimming. The value is otherwise kept verbatim:
/// digits, spaces, dashes and a leading `+` are all allowed. Normalization to
/// the vendor's wire format happens inside each adapter, never here.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Payload field name shared by both vendors (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as provided by the caller.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body.
///
/// Invariant: non-empty after trimming. The original value (including
/// whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Logical field name (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id (`from`): an alphanumeric label for Aqilas, a phone number for
/// Twilio.
///
/// Invariant: non-empty after trimming.
pub struct SenderId(String);

impl SenderId {
    /// Payload field name shared by both vendors (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Scheduled-send timestamp (`send_at`), honored by Aqilas only.
///
/// Invariant: non-empty after trimming. The value is passed through to the
/// vendor verbatim; this crate does not interpret the format.
pub struct SendAt(String);

impl SendAt {
    /// Payload field name used by Aqilas (`send_at`).
    pub const FIELD: &'static str = "send_at";

    /// Create a validated [`SendAt`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the timestamp as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
