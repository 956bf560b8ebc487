use serde::Deserialize;

/// Money-like value the vendors return as either JSON string or JSON number
/// (Aqilas costs and balances, Twilio balance).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum TransportNumber {
    Number(f64),
    String(String),
}

impl TransportNumber {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::String(value) => value.trim().parse::<f64>().ok(),
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::String(value) => value,
        }
    }
}
