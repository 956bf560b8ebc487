//! Outcome types returned by the provider adapters.
//!
//! Failures never cross the adapter boundary as errors; every operation
//! resolves to a tagged outcome so the caller can reshape it without catching
//! anything. Vendor-specific receipt fields are kept in per-provider structs
//! rather than flattened away.

/// Status token reported on a successful send when the vendor omits one.
pub const DEFAULT_SEND_STATUS: &str = "sent";

/// Status token reported when the vendor did not include a delivery status.
pub const UNKNOWN_STATUS: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
/// Result of a send operation.
pub enum SendOutcome {
    Sent(SentMessage),
    Failed(SendFailure),
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    /// Vendor-assigned message id, when the send succeeded and the vendor
    /// returned one.
    pub fn message_id(&self) -> Option<&str> {
        match self {
            Self::Sent(sent) => sent.message_id.as_deref(),
            Self::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Accepted send, as reported by the vendor.
pub struct SentMessage {
    /// Vendor-assigned id; `None` when the vendor response omitted it.
    pub message_id: Option<String>,
    /// Vendor status token, [`DEFAULT_SEND_STATUS`] when absent.
    pub status: String,
    /// Vendor-specific payload carried through for the API layer.
    pub receipt: ProviderReceipt,
}

#[derive(Debug, Clone, PartialEq)]
/// Vendor-specific send receipt.
pub enum ProviderReceipt {
    Aqilas(AqilasReceipt),
    Twilio(TwilioReceipt),
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Extra fields Aqilas reports on an accepted send.
pub struct AqilasReceipt {
    pub bulk_id: Option<String>,
    pub cost: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Extra fields Twilio reports on an accepted send.
pub struct TwilioReceipt {
    pub sid: Option<String>,
    pub status: Option<String>,
    pub to: Option<String>,
    pub from: Option<String>,
    pub price: Option<String>,
    pub price_unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Failed send.
pub struct SendFailure {
    /// Short per-provider failure label.
    pub error: String,
    /// Human-readable detail (transport error text, vendor message, ...).
    pub message: String,
    /// Numeric vendor error code, currently populated by Twilio only.
    pub code: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
/// Result of a delivery-status lookup.
pub enum StatusOutcome {
    Report(DeliveryReport),
    Failed(StatusFailure),
}

impl StatusOutcome {
    pub fn is_report(&self) -> bool {
        matches!(self, Self::Report(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Delivery metadata for one message.
///
/// Every field beyond the id is vendor-dependent; absent fields stay `None`
/// (or [`UNKNOWN_STATUS`] for the status token) and are never fabricated.
pub struct DeliveryReport {
    pub message_id: String,
    pub status: String,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
    pub date_created: Option<String>,
    pub date_sent: Option<String>,
    pub to: Option<String>,
    pub from: Option<String>,
    pub price: Option<String>,
    pub price_unit: Option<String>,
}

impl DeliveryReport {
    /// A report carrying nothing but the id and an unknown status.
    pub fn unknown(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            status: UNKNOWN_STATUS.to_owned(),
            error_code: None,
            error_message: None,
            date_created: None,
            date_sent: None,
            to: None,
            from: None,
            price: None,
            price_unit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Failed status lookup; no partial delivery data is carried.
pub struct StatusFailure {
    pub error: String,
    pub code: Option<i64>,
}
