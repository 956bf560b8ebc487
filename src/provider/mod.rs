//! Provider layer: one adapter per vendor behind a single capability trait.

use std::future::Future;
use std::pin::Pin;

mod aqilas;
mod twilio;

pub use aqilas::AqilasProvider;
pub use twilio::TwilioProvider;

use crate::config::SmsConfig;
use crate::domain::{ProviderKind, SendOutcome, SendRequest, StatusOutcome};
use crate::transport::http::BoxError;

/// Boxed future returned by [`SmsProvider`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The capability set every vendor adapter implements.
///
/// Failures never escape as errors: each operation resolves to a tagged
/// outcome, and balance lookups collapse every failure to `0.0` (callers
/// cannot distinguish a failed check from a genuinely empty account; that
/// ambiguity is inherited from the system this replaces).
pub trait SmsProvider: Send + Sync {
    /// Send one message, normalizing the destination per this vendor's rule.
    fn send<'a>(&'a self, request: &'a SendRequest) -> BoxFuture<'a, SendOutcome>;

    /// Look up delivery status for a previously sent message.
    fn status<'a>(&'a self, message_id: &'a str) -> BoxFuture<'a, StatusOutcome>;

    /// Fetch the account balance; `0.0` on any failure.
    fn balance<'a>(&'a self) -> BoxFuture<'a, f64>;
}

/// Construct a fresh adapter for `kind`.
///
/// Every resolution builds a new adapter (and a new HTTP client); nothing is
/// pooled or reused across switches.
pub(crate) fn resolve(kind: ProviderKind, config: &SmsConfig) -> Box<dyn SmsProvider> {
    match kind {
        ProviderKind::Aqilas => Box::new(AqilasProvider::new(&config.aqilas)),
        ProviderKind::Twilio => Box::new(TwilioProvider::new(&config.twilio)),
    }
}

#[derive(Debug, thiserror::Error)]
/// Internal adapter error; folded into tagged outcomes at the trait boundary.
pub(crate) enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16 },

    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    #[error("{vendor} credentials are missing")]
    NotConfigured { vendor: &'static str },

    #[error("{message}")]
    Vendor { code: Option<i64>, message: String },
}

impl ProviderError {
    /// Numeric vendor error code, when the vendor reported one.
    pub fn vendor_code(&self) -> Option<i64> {
        match self {
            Self::Vendor { code, .. } => *code,
            _ => None,
        }
    }
}
