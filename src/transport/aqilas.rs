//! Aqilas wire format: JSON payload encoding and tolerant response decoding.

use serde::Deserialize;
use serde_json::json;

use super::money::TransportNumber;
use crate::domain::{DEFAULT_SEND_STATUS, SendRequest, phone};

/// Production base path; send POSTs here directly.
pub(crate) const DEFAULT_BASE_URL: &str = "https://www.aqilas.com/api/v1/sms";

/// Auth header carrying the account token on every request.
pub(crate) const AUTH_HEADER: &'static str = "X-AUTH-TOKEN";

#[derive(Debug, thiserror::Error)]
pub(crate) enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode the send payload: `{from, text, to: [normalized]}` plus `send_at`
/// only when scheduled. The recipient array is single-element; Aqilas requires
/// an array even for single sends.
pub(crate) fn encode_send_payload(request: &SendRequest, default_from: &str) -> serde_json::Value {
    let from = request
        .from()
        .map(|sender| sender.as_str())
        .unwrap_or(default_from);

    let mut payload = json!({
        "from": from,
        "text": request.message().as_str(),
        "to": [phone::aqilas_recipient(request.to().raw())],
    });

    if let Some(send_at) = request.send_at() {
        payload["send_at"] = json!(send_at.as_str());
    }

    payload
}

/// Status lookup path. The doubled `/sms` mirrors the vendor's documented
/// concatenation of the base path and the status sub-path.
pub(crate) fn status_url(base_url: &str, message_id: &str) -> String {
    format!("{base_url}/sms/status/{message_id}")
}

pub(crate) fn balance_url(base_url: &str) -> String {
    format!("{base_url}/account/balance")
}

#[derive(Debug, Clone, Deserialize)]
/// Accepted-send body. Every field is optional; Aqilas has been observed to
/// return the id under either `id` or `message_id`.
pub(crate) struct SendBody {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    pub bulk_id: Option<String>,
    #[serde(default)]
    cost: Option<TransportNumber>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl SendBody {
    /// Vendor id; `id` wins over `message_id` when both are present.
    pub fn message_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.message_id.as_deref())
    }

    /// Vendor status token, defaulting to `"sent"` when absent.
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_SEND_STATUS)
    }

    pub fn cost(&self) -> Option<f64> {
        self.cost.clone().and_then(TransportNumber::as_f64)
    }
}

pub(crate) fn decode_send_body(body: &str) -> Result<SendBody, TransportError> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Clone, Deserialize)]
/// Delivery-status body; all fields optional and tolerated when missing.
pub(crate) struct StatusBody {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub date_sent: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    cost: Option<TransportNumber>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl StatusBody {
    pub fn cost(&self) -> Option<String> {
        self.cost.clone().map(TransportNumber::into_string)
    }
}

pub(crate) fn decode_status_body(body: &str) -> Result<StatusBody, TransportError> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceBody {
    #[serde(default)]
    balance: Option<TransportNumber>,
}

/// Decode the balance body; a missing or malformed `balance` field is a zero.
pub(crate) fn decode_balance_body(body: &str) -> Result<f64, TransportError> {
    let parsed: BalanceBody = serde_json::from_str(body)?;
    Ok(parsed
        .balance
        .and_then(TransportNumber::as_f64)
        .unwrap_or(0.0))
}
