//! Twilio wire format: message-create form encoding, resource decoding, and
//! vendor date conversion.

use chrono::DateTime;
use serde::Deserialize;

use super::money::TransportNumber;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

/// Text layout for vendor timestamps surfaced to callers.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub(crate) enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn messages_url(base_url: &str, account_sid: &str) -> String {
    format!("{base_url}/Accounts/{account_sid}/Messages.json")
}

pub(crate) fn message_url(base_url: &str, account_sid: &str, message_sid: &str) -> String {
    format!("{base_url}/Accounts/{account_sid}/Messages/{message_sid}.json")
}

pub(crate) fn balance_url(base_url: &str, account_sid: &str) -> String {
    format!("{base_url}/Accounts/{account_sid}/Balance.json")
}

pub(crate) fn encode_send_form(to: &str, from: &str, body: &str) -> Vec<(String, String)> {
    vec![
        ("To".to_owned(), to.to_owned()),
        ("From".to_owned(), from.to_owned()),
        ("Body".to_owned(), body.to_owned()),
    ]
}

#[derive(Debug, Clone, Deserialize)]
/// A Message resource, as returned by both create and fetch.
pub(crate) struct MessageBody {
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub price_unit: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub date_sent: Option<String>,
}

pub(crate) fn decode_message_body(body: &str) -> Result<MessageBody, TransportError> {
    Ok(serde_json::from_str(body)?)
}

#[derive(Debug, Clone, Deserialize)]
/// Twilio error envelope (`{code, message, status}`); the numeric code is the
/// part worth preserving for callers.
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Best-effort decode of an error body; non-JSON bodies yield `None`.
pub(crate) fn decode_error_body(body: &str) -> Option<ErrorBody> {
    serde_json::from_str(body).ok()
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceBody {
    #[serde(default)]
    balance: Option<TransportNumber>,
}

pub(crate) fn decode_balance_body(body: &str) -> Result<f64, TransportError> {
    let parsed: BalanceBody = serde_json::from_str(body)?;
    Ok(parsed
        .balance
        .and_then(TransportNumber::as_f64)
        .unwrap_or(0.0))
}

/// Convert a vendor RFC 2822 date to `YYYY-MM-DD HH:MM:SS` text.
///
/// `None` passes through untouched (the vendor has not set the field yet);
/// values the vendor returns in an unexpected layout are kept verbatim rather
/// than dropped.
pub(crate) fn format_timestamp(raw: Option<String>) -> Option<String> {
    raw.map(|value| match DateTime::parse_from_rfc2822(&value) {
        Ok(parsed) => parsed.format(TIMESTAMP_FORMAT).to_string(),
        Err(_) => value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_embed_account_and_message_sids() {
        assert_eq!(
            messages_url(DEFAULT_BASE_URL, "AC123"),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
        assert_eq!(
            message_url(DEFAULT_BASE_URL, "AC123", "SM9"),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages/SM9.json"
        );
        assert_eq!(
            balance_url(DEFAULT_BASE_URL, "AC123"),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Balance.json"
        );
    }

    #[test]
    fn encode_send_form_uses_capitalized_fields() {
        assert_eq!(
            encode_send_form("+22670123456", "+15005550006", "hi"),
            vec![
                ("To".to_owned(), "+22670123456".to_owned()),
                ("From".to_owned(), "+15005550006".to_owned()),
                ("Body".to_owned(), "hi".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_message_body_tolerates_nulls() {
        let body = decode_message_body(
            r#"{
                "sid": "SM9",
                "status": "queued",
                "to": "+22670123456",
                "from": "+15005550006",
                "price": null,
                "price_unit": "USD",
                "error_code": null,
                "error_message": null,
                "date_created": "Mon, 16 Aug 2010 03:45:01 +0000",
                "date_sent": null
            }"#,
        )
        .unwrap();
        assert_eq!(body.sid.as_deref(), Some("SM9"));
        assert_eq!(body.status.as_deref(), Some("queued"));
        assert!(body.price.is_none());
        assert!(body.date_sent.is_none());
    }

    #[test]
    fn decode_error_body_preserves_numeric_code() {
        let error = decode_error_body(
            r#"{"code": 21211, "message": "The 'To' number is not valid.", "status": 400}"#,
        )
        .unwrap();
        assert_eq!(error.code, Some(21211));
        assert_eq!(
            error.message.as_deref(),
            Some("The 'To' number is not valid.")
        );

        assert!(decode_error_body("<html>bad gateway</html>").is_none());
    }

    #[test]
    fn balance_is_reported_as_string_by_the_vendor() {
        assert_eq!(
            decode_balance_body(r#"{"balance": "15.42", "currency": "USD"}"#).unwrap(),
            15.42
        );
        assert_eq!(decode_balance_body("{}").unwrap(), 0.0);
    }

    #[test]
    fn format_timestamp_converts_rfc2822_and_passes_null_through() {
        assert_eq!(
            format_timestamp(Some("Mon, 16 Aug 2010 03:45:01 +0000".to_owned())),
            Some("2010-08-16 03:45:01".to_owned())
        );
        assert_eq!(format_timestamp(None), None);
        // Unexpected layout: kept verbatim.
        assert_eq!(
            format_timestamp(Some("2010-08-16".to_owned())),
            Some("2010-08-16".to_owned())
        );
    }
}
