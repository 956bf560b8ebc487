use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// The closed set of supported SMS vendors.
///
/// The lowercase tokens are used both for configuration lookup and for
/// identifying the active provider in responses. There is no third value;
/// unrecognized tokens resolve to [`ProviderKind::Aqilas`].
pub enum ProviderKind {
    /// Regional aggregator (bulk-capable, array-based recipients, XOF costs).
    #[default]
    Aqilas,
    /// Global carrier platform (sid-based message ids, USD prices).
    Twilio,
}

impl ProviderKind {
    /// The two supported providers, in resolution-fallback order.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Aqilas, ProviderKind::Twilio];

    /// Resolve a provider from its configuration token, case-insensitively.
    ///
    /// Unrecognized tokens silently fall back to [`ProviderKind::Aqilas`];
    /// this mirrors the dispatch semantics the facade is built around and is
    /// why this is not a `FromStr` impl returning an error.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "twilio" => Self::Twilio,
            _ => Self::Aqilas,
        }
    }

    /// Lowercase token identifying this provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aqilas => "aqilas",
            Self::Twilio => "twilio",
        }
    }

    /// Currency code for balances reported by this provider.
    ///
    /// Neither vendor adapter returns a currency alongside the balance; the
    /// caller infers it from which provider is active.
    pub fn currency(self) -> &'static str {
        match self {
            Self::Aqilas => "XOF",
            Self::Twilio => "USD",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_token_is_case_insensitive() {
        assert_eq!(ProviderKind::from_token("TWILIO"), ProviderKind::Twilio);
        assert_eq!(ProviderKind::from_token("twilio"), ProviderKind::Twilio);
        assert_eq!(ProviderKind::from_token("Twilio"), ProviderKind::Twilio);
        assert_eq!(ProviderKind::from_token(" aqilas "), ProviderKind::Aqilas);
        assert_eq!(ProviderKind::from_token("AQILAS"), ProviderKind::Aqilas);
    }

    #[test]
    fn unrecognized_tokens_fall_back_to_aqilas() {
        assert_eq!(
            ProviderKind::from_token("unknown-provider"),
            ProviderKind::Aqilas
        );
        assert_eq!(ProviderKind::from_token(""), ProviderKind::Aqilas);
    }

    #[test]
    fn tokens_and_currencies_are_fixed() {
        assert_eq!(ProviderKind::Aqilas.as_str(), "aqilas");
        assert_eq!(ProviderKind::Twilio.as_str(), "twilio");
        assert_eq!(ProviderKind::Aqilas.currency(), "XOF");
        assert_eq!(ProviderKind::Twilio.currency(), "USD");
        assert_eq!(
            ProviderKind::ALL,
            [ProviderKind::Aqilas, ProviderKind::Twilio]
        );
    }
}
