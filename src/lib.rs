//! Multi-provider SMS dispatch facade for the Aqilas and Twilio HTTP APIs.
//!
//! The design follows three layers: a domain layer of strong types and
//! per-vendor normalization rules, a transport layer for wire-format quirks,
//! and a provider layer with one adapter per vendor behind the [`SmsProvider`]
//! trait. [`SmsFacade`] binds one adapter at a time, selected by
//! configuration and switchable at runtime.
//!
//! ```rust,no_run
//! use smsgate::{SmsConfig, SmsFacade};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut facade = SmsFacade::new(SmsConfig::from_env());
//!     facade.switch_provider("twilio");
//!     let outcome = facade.send("70 12 34 56", "hello", None).await;
//!     println!("sent: {}, id: {:?}", outcome.is_sent(), outcome.message_id());
//! }
//! ```
//!
//! Failures are tagged outcome values, never panics or errors crossing the
//! facade boundary; balance failures collapse to `0.0` by contract.
#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
mod facade;
pub mod provider;
mod transport;

pub use config::{AqilasConfig, SmsConfig, TwilioConfig};
pub use domain::{
    AqilasReceipt, DeliveryReport, MessageText, ProviderKind, ProviderReceipt, RawPhoneNumber,
    SendAt, SendFailure, SendOutcome, SendRequest, SenderId, SentMessage, StatusFailure,
    StatusOutcome, TwilioReceipt, ValidationError,
};
pub use facade::SmsFacade;
pub use provider::{AqilasProvider, SmsProvider, TwilioProvider};
