//! Domain layer: strong types with validation and invariants (no I/O).

pub mod phone;
mod provider;
mod request;
mod response;
mod validation;
mod value;

pub use provider::ProviderKind;
pub use request::SendRequest;
pub use response::{
    AqilasReceipt, DEFAULT_SEND_STATUS, DeliveryReport, ProviderReceipt, SendFailure, SendOutcome,
    SentMessage, StatusFailure, StatusOutcome, TwilioReceipt, UNKNOWN_STATUS,
};
pub use validation::ValidationError;
pub use value::{MessageText, RawPhoneNumber, SendAt, SenderId};
