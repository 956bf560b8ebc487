//! Twilio adapter: basic-auth REST API, scalar recipients, sid-based ids.

use std::sync::Arc;

use super::{BoxFuture, ProviderError, SmsProvider};
use crate::config::TwilioConfig;
use crate::domain::{
    DEFAULT_SEND_STATUS, DeliveryReport, ProviderReceipt, SendFailure, SendOutcome, SendRequest,
    SentMessage, StatusFailure, StatusOutcome, TwilioReceipt, UNKNOWN_STATUS, phone,
};
use crate::transport::http::{HttpRequest, HttpTransport, build_transport};
use crate::transport::twilio::{
    balance_url, decode_balance_body, decode_error_body, decode_message_body, encode_send_form,
    format_timestamp, message_url, messages_url,
};

const SEND_FAILED: &str = "Twilio SMS sending failed";

#[derive(Debug, Clone)]
struct Credentials {
    account_sid: String,
    auth_token: String,
}

/// Adapter for the Twilio carrier API.
///
/// When either the account SID or the auth token is missing the adapter is
/// unconfigured: every operation short-circuits to a "not configured" failure
/// (or zero balance) without touching the network.
pub struct TwilioProvider {
    credentials: Option<Credentials>,
    from_number: Option<String>,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl TwilioProvider {
    /// Build an adapter with a fresh HTTP client.
    pub fn new(config: &TwilioConfig) -> Self {
        Self::with_transport(config, build_transport(true))
    }

    pub(crate) fn with_transport(config: &TwilioConfig, http: Arc<dyn HttpTransport>) -> Self {
        let credentials = match (&config.account_sid, &config.auth_token) {
            (Some(account_sid), Some(auth_token)) => Some(Credentials {
                account_sid: account_sid.clone(),
                auth_token: auth_token.clone(),
            }),
            _ => None,
        };
        Self {
            credentials,
            from_number: config.from_number.clone(),
            base_url: config.base_url.clone(),
            http,
        }
    }

    fn credentials(&self) -> Result<&Credentials, ProviderError> {
        self.credentials
            .as_ref()
            .ok_or(ProviderError::NotConfigured { vendor: "Twilio" })
    }

    /// Map a non-2xx response to an error, preserving the vendor's numeric
    /// code when the body carries a Twilio error envelope.
    fn vendor_error(status: u16, body: &str) -> ProviderError {
        match decode_error_body(body) {
            Some(error) if error.code.is_some() || error.message.is_some() => {
                ProviderError::Vendor {
                    code: error.code,
                    message: error
                        .message
                        .unwrap_or_else(|| format!("unexpected HTTP status: {status}")),
                }
            }
            _ => ProviderError::HttpStatus { status },
        }
    }

    async fn try_send(&self, request: &SendRequest) -> Result<SentMessage, ProviderError> {
        let credentials = self.credentials()?;
        let to = phone::twilio_recipient(request.to().raw());
        let from = request
            .from()
            .map(|sender| sender.as_str().to_owned())
            .or_else(|| self.from_number.clone())
            .unwrap_or_default();

        let url = messages_url(&self.base_url, &credentials.account_sid);
        let response = self
            .http
            .execute(
                HttpRequest::post(url)
                    .basic_auth(
                        credentials.account_sid.clone(),
                        credentials.auth_token.clone(),
                    )
                    .form(encode_send_form(&to, &from, request.message().as_str())),
            )
            .await
            .map_err(ProviderError::Transport)?;

        if !response.is_success() {
            return Err(Self::vendor_error(response.status, &response.body));
        }

        let body = decode_message_body(&response.body)
            .map_err(|err| ProviderError::Parse(Box::new(err)))?;

        Ok(SentMessage {
            message_id: body.sid.clone(),
            status: body
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_SEND_STATUS.to_owned()),
            receipt: ProviderReceipt::Twilio(TwilioReceipt {
                sid: body.sid,
                status: body.status,
                to: body.to,
                from: body.from,
                price: body.price,
                price_unit: body.price_unit,
            }),
        })
    }

    async fn try_status(&self, message_id: &str) -> Result<DeliveryReport, ProviderError> {
        let credentials = self.credentials()?;
        let url = message_url(&self.base_url, &credentials.account_sid, message_id);
        let response = self
            .http
            .execute(HttpRequest::get(url).basic_auth(
                credentials.account_sid.clone(),
                credentials.auth_token.clone(),
            ))
            .await
            .map_err(ProviderError::Transport)?;

        if !response.is_success() {
            return Err(Self::vendor_error(response.status, &response.body));
        }

        let body = decode_message_body(&response.body)
            .map_err(|err| ProviderError::Parse(Box::new(err)))?;

        Ok(DeliveryReport {
            message_id: body.sid.unwrap_or_else(|| message_id.to_owned()),
            status: body
                .status
                .unwrap_or_else(|| UNKNOWN_STATUS.to_owned()),
            error_code: body.error_code,
            error_message: body.error_message,
            date_created: format_timestamp(body.date_created),
            date_sent: format_timestamp(body.date_sent),
            to: body.to,
            from: body.from,
            price: body.price,
            price_unit: body.price_unit,
        })
    }

    async fn try_balance(&self) -> Result<f64, ProviderError> {
        let credentials = self.credentials()?;
        let url = balance_url(&self.base_url, &credentials.account_sid);
        let response = self
            .http
            .execute(HttpRequest::get(url).basic_auth(
                credentials.account_sid.clone(),
                credentials.auth_token.clone(),
            ))
            .await
            .map_err(ProviderError::Transport)?;

        if !response.is_success() {
            return Err(Self::vendor_error(response.status, &response.body));
        }

        decode_balance_body(&response.body).map_err(|err| ProviderError::Parse(Box::new(err)))
    }
}

impl SmsProvider for TwilioProvider {
    fn send<'a>(&'a self, request: &'a SendRequest) -> BoxFuture<'a, SendOutcome> {
        Box::pin(async move {
            match self.try_send(request).await {
                Ok(sent) => {
                    tracing::info!(
                        provider = "twilio",
                        to = request.to().raw(),
                        message_id = sent.message_id.as_deref(),
                        status = sent.status.as_str(),
                        "sms accepted"
                    );
                    SendOutcome::Sent(sent)
                }
                Err(err) => {
                    tracing::error!(
                        provider = "twilio",
                        to = request.to().raw(),
                        error = %err,
                        code = err.vendor_code(),
                        "sms send failed"
                    );
                    SendOutcome::Failed(SendFailure {
                        error: SEND_FAILED.to_owned(),
                        message: err.to_string(),
                        code: err.vendor_code(),
                    })
                }
            }
        })
    }

    fn status<'a>(&'a self, message_id: &'a str) -> BoxFuture<'a, StatusOutcome> {
        Box::pin(async move {
            match self.try_status(message_id).await {
                Ok(report) => StatusOutcome::Report(report),
                Err(err) => {
                    tracing::error!(
                        provider = "twilio",
                        message_id,
                        error = %err,
                        "status lookup failed"
                    );
                    StatusOutcome::Failed(StatusFailure {
                        error: err.to_string(),
                        code: err.vendor_code(),
                    })
                }
            }
        })
    }

    fn balance<'a>(&'a self) -> BoxFuture<'a, f64> {
        Box::pin(async move {
            match self.try_balance().await {
                Ok(balance) => balance,
                Err(err) => {
                    // Fail-silent contract: balance errors collapse to zero.
                    tracing::error!(provider = "twilio", error = %err, "balance check failed");
                    0.0
                }
            }
        })
    }
}
