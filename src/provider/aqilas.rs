//! Aqilas adapter: token-header JSON API, array-based recipients.

use std::sync::Arc;

use super::{BoxFuture, ProviderError, SmsProvider};
use crate::config::AqilasConfig;
use crate::domain::{
    AqilasReceipt, DeliveryReport, ProviderReceipt, SendFailure, SendOutcome, SendRequest,
    SentMessage, StatusFailure, StatusOutcome, UNKNOWN_STATUS,
};
use crate::transport::aqilas::{
    AUTH_HEADER, balance_url, decode_balance_body, decode_send_body, decode_status_body,
    encode_send_payload, status_url,
};
use crate::transport::http::{HttpRequest, HttpTransport, build_transport};

const SEND_FAILED: &str = "Aqilas SMS sending failed";

/// Adapter for the Aqilas aggregator.
///
/// A missing token does not short-circuit anything here: requests go out with
/// an empty auth header and the vendor rejects them, matching the system this
/// replaces.
pub struct AqilasProvider {
    token: String,
    default_from: String,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl AqilasProvider {
    /// Build an adapter with a fresh HTTP client.
    pub fn new(config: &AqilasConfig) -> Self {
        Self::with_transport(config, build_transport(config.verify_tls))
    }

    pub(crate) fn with_transport(config: &AqilasConfig, http: Arc<dyn HttpTransport>) -> Self {
        Self {
            token: config.token.clone().unwrap_or_default(),
            default_from: config.default_from.clone(),
            base_url: config.base_url.clone(),
            http,
        }
    }

    fn authed(&self, request: HttpRequest) -> HttpRequest {
        request.header(AUTH_HEADER, self.token.clone())
    }

    async fn try_send(&self, request: &SendRequest) -> Result<SentMessage, ProviderError> {
        let payload = encode_send_payload(request, &self.default_from);
        let response = self
            .http
            .execute(self.authed(HttpRequest::post(&self.base_url).json(payload)))
            .await
            .map_err(ProviderError::Transport)?;

        if !response.is_success() {
            return Err(ProviderError::HttpStatus {
                status: response.status,
            });
        }

        let body = decode_send_body(&response.body)
            .map_err(|err| ProviderError::Parse(Box::new(err)))?;

        Ok(SentMessage {
            message_id: body.message_id().map(str::to_owned),
            status: body.status().to_owned(),
            receipt: ProviderReceipt::Aqilas(AqilasReceipt {
                bulk_id: body.bulk_id.clone(),
                cost: body.cost(),
                currency: body.currency.clone(),
            }),
        })
    }

    async fn try_status(&self, message_id: &str) -> Result<DeliveryReport, ProviderError> {
        let url = status_url(&self.base_url, message_id);
        let response = self
            .http
            .execute(self.authed(HttpRequest::get(url)))
            .await
            .map_err(ProviderError::Transport)?;

        if !response.is_success() {
            return Err(ProviderError::HttpStatus {
                status: response.status,
            });
        }

        let body = decode_status_body(&response.body)
            .map_err(|err| ProviderError::Parse(Box::new(err)))?;

        Ok(DeliveryReport {
            message_id: message_id.to_owned(),
            status: body.status.clone().unwrap_or_else(|| UNKNOWN_STATUS.to_owned()),
            error_code: body.error_code,
            error_message: body.error_message.clone(),
            date_created: None,
            date_sent: body.date_sent.clone(),
            to: body.to.clone(),
            from: body.from.clone(),
            price: body.cost(),
            price_unit: body.currency.clone(),
        })
    }

    async fn try_balance(&self) -> Result<f64, ProviderError> {
        let url = balance_url(&self.base_url);
        let response = self
            .http
            .execute(self.authed(HttpRequest::get(url)))
            .await
            .map_err(ProviderError::Transport)?;

        if !response.is_success() {
            return Err(ProviderError::HttpStatus {
                status: response.status,
            });
        }

        decode_balance_body(&response.body).map_err(|err| ProviderError::Parse(Box::new(err)))
    }
}

impl SmsProvider for AqilasProvider {
    fn send<'a>(&'a self, request: &'a SendRequest) -> BoxFuture<'a, SendOutcome> {
        Box::pin(async move {
            match self.try_send(request).await {
                Ok(sent) => {
                    tracing::info!(
                        provider = "aqilas",
                        to = request.to().raw(),
                        message_id = sent.message_id.as_deref(),
                        "sms accepted"
                    );
                    SendOutcome::Sent(sent)
                }
                Err(err) => {
                    tracing::error!(
                        provider = "aqilas",
                        to = request.to().raw(),
                        error = %err,
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
                        provider = "aqilas",
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
                    tracing::error!(provider = "aqilas", error = %err, "balance check failed");
                    0.0
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::transport::http::HttpBody;
    use crate::transport::http::fake::FakeTransport;

    fn adapter(transport: FakeTransport) -> AqilasProvider {
        let config = AqilasConfig {
            token: Some("secret-token".to_owned()),
            base_url: "https://aqilas.invalid/api/v1/sms".to_owned(),
            ..AqilasConfig::default()
        };
        AqilasProvider::with_transport(&config, Arc::new(transport))
    }

    #[tokio::test]
    async fn send_posts_normalized_single_element_recipient_array() {
        let transport = FakeTransport::new(200, r#"{"id": "a1", "status": "queued"}"#);
        let provider = adapter(transport.clone());
        let request = SendRequest::new("70 12 34 56", "hi").unwrap();

        let outcome = provider.send(&request).await;
        assert_eq!(outcome.message_id(), Some("a1"));

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://aqilas.invalid/api/v1/sms");
        assert!(
            sent.headers
                .iter()
                .any(|(name, value)| *name == "X-AUTH-TOKEN" && value == "secret-token")
        );
        match sent.body.unwrap() {
            HttpBody::Json(payload) => {
                assert_eq!(
                    payload,
                    serde_json::json!({
                        "from": "SAWES",
                        "text": "hi",
                        "to": ["+22670123456"],
                    })
                );
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_defaults_status_and_tolerates_missing_message_id() {
        let transport = FakeTransport::new(200, r#"{"bulk_id": "bulk-7"}"#);
        let provider = adapter(transport);
        let request = SendRequest::new("70123456", "hi").unwrap();

        match provider.send(&request).await {
            SendOutcome::Sent(sent) => {
                assert_eq!(sent.message_id, None);
                assert_eq!(sent.status, "sent");
                match sent.receipt {
                    ProviderReceipt::Aqilas(receipt) => {
                        assert_eq!(receipt.bulk_id.as_deref(), Some("bulk-7"));
                    }
                    other => panic!("unexpected receipt: {other:?}"),
                }
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_maps_http_failure_to_tagged_failure() {
        let transport = FakeTransport::new(401, r#"{"error": "bad token"}"#);
        let provider = adapter(transport);
        let request = SendRequest::new("70123456", "hi").unwrap();

        match provider.send(&request).await {
            SendOutcome::Failed(failure) => {
                assert_eq!(failure.error, "Aqilas SMS sending failed");
                assert!(failure.message.contains("401"));
                assert_eq!(failure.code, None);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_maps_transport_exception_to_tagged_failure() {
        let transport = FakeTransport::failing("connection refused");
        let provider = adapter(transport);
        let request = SendRequest::new("70123456", "hi").unwrap();

        match provider.send(&request).await {
            SendOutcome::Failed(failure) => {
                assert!(failure.message.contains("connection refused"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_hits_the_status_sub_path() {
        let transport = FakeTransport::new(
            200,
            r#"{"status": "delivered", "date_sent": "2025-06-01 08:00:00", "cost": "25", "currency": "XOF"}"#,
        );
        let provider = adapter(transport.clone());

        match provider.status("a1").await {
            StatusOutcome::Report(report) => {
                assert_eq!(report.message_id, "a1");
                assert_eq!(report.status, "delivered");
                assert_eq!(report.date_sent.as_deref(), Some("2025-06-01 08:00:00"));
                assert_eq!(report.price.as_deref(), Some("25"));
                assert_eq!(report.price_unit.as_deref(), Some("XOF"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://aqilas.invalid/api/v1/sms/sms/status/a1");
    }

    #[tokio::test]
    async fn status_reports_unknown_when_vendor_omits_it() {
        let transport = FakeTransport::new(200, "{}");
        let provider = adapter(transport);

        match provider.status("a1").await {
            StatusOutcome::Report(report) => assert_eq!(report.status, "unknown"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_failure_carries_no_partial_data() {
        let transport = FakeTransport::new(500, "oops");
        let provider = adapter(transport);

        match provider.status("a1").await {
            StatusOutcome::Failed(failure) => assert!(failure.error.contains("500")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn balance_reads_the_account_sub_path() {
        let transport = FakeTransport::new(200, r#"{"balance": "1500.5"}"#);
        let provider = adapter(transport.clone());

        assert_eq!(provider.balance().await, 1500.5);
        let request = transport.last_request().unwrap();
        assert_eq!(
            request.url,
            "https://aqilas.invalid/api/v1/sms/account/balance"
        );
    }

    #[tokio::test]
    async fn balance_failures_collapse_to_zero() {
        let provider = adapter(FakeTransport::new(503, "down"));
        assert_eq!(provider.balance().await, 0.0);

        let provider = adapter(FakeTransport::failing("dns error"));
        assert_eq!(provider.balance().await, 0.0);

        let provider = adapter(FakeTransport::new(200, "not json"));
        assert_eq!(provider.balance().await, 0.0);
    }

    #[tokio::test]
    async fn missing_token_still_attempts_the_request() {
        let config = AqilasConfig {
            token: None,
            base_url: "https://aqilas.invalid/api/v1/sms".to_owned(),
            ..AqilasConfig::default()
        };
        let transport = FakeTransport::new(401, "{}");
        let provider = AqilasProvider::with_transport(&config, Arc::new(transport.clone()));
        let request = SendRequest::new("70123456", "hi").unwrap();

        let outcome = provider.send(&request).await;
        assert!(!outcome.is_sent());
        assert_eq!(transport.calls(), 1);
    }
}
