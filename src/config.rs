//! Environment-driven configuration for provider selection and credentials.

use std::env;

use crate::domain::ProviderKind;
use crate::transport::{aqilas, twilio};

/// Sender label used for Aqilas when none is configured.
pub const DEFAULT_AQILAS_FROM: &str = "SAWES";

#[derive(Debug, Clone)]
/// Configuration consumed by [`crate::SmsFacade`] and the adapter factory.
pub struct SmsConfig {
    /// Provider bound on facade construction (`SMS_PROVIDER`).
    pub default_provider: ProviderKind,
    pub aqilas: AqilasConfig,
    pub twilio: TwilioConfig,
}

#[derive(Debug, Clone)]
pub struct AqilasConfig {
    /// Account token sent in the `X-AUTH-TOKEN` header (`AQILAS_API_TOKEN`).
    ///
    /// Aqilas requests are attempted even when this is absent; the vendor is
    /// the one that rejects them.
    pub token: Option<String>,
    /// Default sender label (`AQILAS_DEFAULT_FROM`, default `SAWES`).
    pub default_from: String,
    /// Base API path; overridable for tests and staging.
    pub base_url: String,
    /// TLS certificate verification (`AQILAS_VERIFY_TLS`, default on).
    ///
    /// The historical deployment ran with verification off; that behavior is
    /// available for parity testing only and must be opted into explicitly.
    pub verify_tls: bool,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Account SID (`TWILIO_ACCOUNT_SID`).
    pub account_sid: Option<String>,
    /// Auth token (`TWILIO_AUTH_TOKEN`).
    pub auth_token: Option<String>,
    /// Default sender number (`TWILIO_FROM_NUMBER`).
    pub from_number: Option<String>,
    /// Base API path; overridable for tests.
    pub base_url: String,
}

impl Default for AqilasConfig {
    fn default() -> Self {
        Self {
            token: None,
            default_from: DEFAULT_AQILAS_FROM.to_owned(),
            base_url: aqilas::DEFAULT_BASE_URL.to_owned(),
            verify_tls: true,
        }
    }
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            from_number: None,
            base_url: twilio::DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            default_provider: ProviderKind::Aqilas,
            aqilas: AqilasConfig::default(),
            twilio: TwilioConfig::default(),
        }
    }
}

impl SmsConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults; an unset or unrecognized
    /// `SMS_PROVIDER` selects Aqilas.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(provider) = lookup("SMS_PROVIDER") {
            config.default_provider = ProviderKind::from_token(&provider);
        }

        config.aqilas.token = non_empty(lookup("AQILAS_API_TOKEN"));
        if let Some(from) = non_empty(lookup("AQILAS_DEFAULT_FROM")) {
            config.aqilas.default_from = from;
        }
        if let Some(flag) = lookup("AQILAS_VERIFY_TLS") {
            config.aqilas.verify_tls = parse_flag(&flag);
        }

        config.twilio.account_sid = non_empty(lookup("TWILIO_ACCOUNT_SID"));
        config.twilio.auth_token = non_empty(lookup("TWILIO_AUTH_TOKEN"));
        config.twilio.from_number = non_empty(lookup("TWILIO_FROM_NUMBER"));

        config
    }

    /// Whether the given provider has the credentials it needs.
    ///
    /// Aqilas needs its token; Twilio needs both the account SID and the auth
    /// token.
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Aqilas => self.aqilas.token.is_some(),
            ProviderKind::Twilio => {
                self.twilio.account_sid.is_some() && self.twilio.auth_token.is_some()
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false")
}
