//! Per-vendor phone number normalization.
//!
//! Both rules start by stripping every non-digit character and differ only in
//! when the Burkina Faso country code is prepended. Neither rule validates
//! digit counts; malformed numbers are forwarded and the vendor API is the
//! authority on rejection.

/// Burkina Faso country-code prefix assumed for local numbers.
pub const LOCAL_COUNTRY_CODE: &str = "226";

/// Normalize a recipient for the Aqilas API.
///
/// Strips non-digits, prepends `226` unless the digits already start with it,
/// and prefixes `+`. The Aqilas payload encoder wraps the result in a
/// single-element array, as the vendor requires even for single sends.
pub fn aqilas_recipient(raw: &str) -> String {
    let digits = strip_non_digits(raw);
    if digits.starts_with(LOCAL_COUNTRY_CODE) {
        format!("+{digits}")
    } else {
        format!("+{LOCAL_COUNTRY_CODE}{digits}")
    }
}

/// Normalize a recipient for the Twilio API.
///
/// Strips non-digits, prepends `226` only when the digits look like a bare
/// 8-digit local number, and prefixes `+` unconditionally. Returned as a bare
/// string; Twilio takes a scalar recipient.
pub fn twilio_recipient(raw: &str) -> String {
    let digits = strip_non_digits(raw);
    if !digits.starts_with(LOCAL_COUNTRY_CODE) && digits.len() == 8 {
        format!("+{LOCAL_COUNTRY_CODE}{digits}")
    } else {
        format!("+{digits}")
    }
}

fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aqilas_prefixes_local_numbers() {
        assert_eq!(aqilas_recipient("70 12 34 56"), "+22670123456");
        assert_eq!(aqilas_recipient("70-12-34-56"), "+22670123456");
        assert_eq!(aqilas_recipient("70123456"), "+22670123456");
    }

    #[test]
    fn aqilas_keeps_existing_country_code() {
        assert_eq!(aqilas_recipient("22670123456"), "+22670123456");
        assert_eq!(aqilas_recipient("+226 70 12 34 56"), "+22670123456");
    }

    #[test]
    fn twilio_prefixes_only_bare_eight_digit_numbers() {
        assert_eq!(twilio_recipient("70 12 34 56"), "+22670123456");
        assert_eq!(twilio_recipient("70123456"), "+22670123456");
        // 11 digits, foreign country code: left alone apart from the plus.
        assert_eq!(twilio_recipient("15551234567"), "+15551234567");
        assert_eq!(twilio_recipient("+1 (555) 123-4567"), "+15551234567");
    }

    #[test]
    fn twilio_keeps_existing_country_code() {
        assert_eq!(twilio_recipient("22670123456"), "+22670123456");
        assert_eq!(twilio_recipient("+226-70-12-34-56"), "+22670123456");
    }

    #[test]
    fn malformed_numbers_pass_through_unvalidated() {
        // 5 digits is not a valid subscriber number anywhere; still forwarded.
        assert_eq!(aqilas_recipient("123-45"), "+22612345");
        assert_eq!(twilio_recipient("123-45"), "+12345");
    }
}
