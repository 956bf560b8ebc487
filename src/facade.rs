//! The single entry point callers use; hides which adapter is active.

use crate::config::SmsConfig;
use crate::domain::{
    ProviderKind, SendFailure, SendOutcome, SendRequest, StatusOutcome, ValidationError,
};
use crate::provider::{self, SmsProvider};

/// Delegating facade over the currently bound provider adapter.
///
/// A facade holds exactly one resolved adapter at a time. Switching providers
/// synchronously constructs a fresh adapter (including a fresh HTTP client)
/// and discards the old one. There is no lock around the binding: use one
/// facade per logical request rather than sharing one across concurrent
/// switches.
pub struct SmsFacade {
    config: SmsConfig,
    active: ProviderKind,
    provider: Box<dyn SmsProvider>,
}

impl SmsFacade {
    /// Bind the configured default provider.
    pub fn new(config: SmsConfig) -> Self {
        let active = config.default_provider;
        let provider = provider::resolve(active, &config);
        Self {
            config,
            active,
            provider,
        }
    }

    /// Convenience constructor reading [`SmsConfig::from_env`].
    pub fn from_env() -> Self {
        Self::new(SmsConfig::from_env())
    }

    /// Re-bind to the provider named by `token`.
    ///
    /// Matching is case-insensitive and never fails: unrecognized tokens fall
    /// back to Aqilas. The replacement adapter is constructed immediately.
    pub fn switch_provider(&mut self, token: &str) -> ProviderKind {
        let kind = ProviderKind::from_token(token);
        tracing::info!(from = %self.active, to = %kind, "switching sms provider");
        self.active = kind;
        self.provider = provider::resolve(kind, &self.config);
        kind
    }

    /// Send a message with just a destination, body, and optional sender.
    ///
    /// Invalid parameters surface as a tagged [`SendFailure`], keeping the
    /// no-errors-across-the-boundary contract of the provider layer.
    pub async fn send(
        &self,
        to: impl Into<String>,
        message: impl Into<String>,
        from: Option<String>,
    ) -> SendOutcome {
        let request = match build_request(to.into(), message.into(), from) {
            Ok(request) => request,
            Err(err) => {
                tracing::error!(provider = %self.active, error = %err, "rejected send parameters");
                return SendOutcome::Failed(SendFailure {
                    error: "invalid send parameters".to_owned(),
                    message: err.to_string(),
                    code: None,
                });
            }
        };
        self.send_with_request(&request).await
    }

    /// Send with the full parameter set (sender override, scheduled send).
    pub async fn send_with_request(&self, request: &SendRequest) -> SendOutcome {
        // The message body is deliberately absent from this log line.
        tracing::info!(
            provider = %self.active,
            to = request.to().raw(),
            from = request.from().map(|sender| sender.as_str()),
            send_at = request.send_at().map(|at| at.as_str()),
            message_length = request.message().as_str().len(),
            "sending sms"
        );
        self.provider.send(request).await
    }

    /// Delivery status for a previously sent message.
    pub async fn status(&self, message_id: &str) -> StatusOutcome {
        tracing::info!(provider = %self.active, message_id, "checking sms status");
        self.provider.status(message_id).await
    }

    /// Account balance for the active provider; `0.0` on any failure.
    pub async fn balance(&self) -> f64 {
        tracing::info!(provider = %self.active, "checking sms balance");
        self.provider.balance().await
    }

    /// The currently bound provider.
    pub fn provider_name(&self) -> ProviderKind {
        self.active
    }

    /// The fixed two-provider enumeration.
    pub fn available_providers() -> [ProviderKind; 2] {
        ProviderKind::ALL
    }

    /// Whether `kind` has the credentials it needs.
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        self.config.is_configured(kind)
    }

    /// Currency of the active provider's balance, inferred from the binding.
    pub fn balance_currency(&self) -> &'static str {
        self.active.currency()
    }
}

fn build_request(
    to: String,
    message: String,
    from: Option<String>,
) -> Result<SendRequest, ValidationError> {
    let request = SendRequest::new(to, message)?;
    match from {
        Some(from) => request.with_from(from),
        None => Ok(request),
    }
}
