//! Keys and parsing for platform-wide tunables.
//!
//! The values live in a key/value store owned by the enclosing system; this
//! module defines the keys the rule core consumes and how their raw string
//! values are interpreted.

use std::num::ParseIntError;

/// Fee (in the platform currency's smallest unit) charged before a hackathon
/// may be created. `"0"` disables the payment gate.
pub const CREATION_FEE_KEY: &str = "creation_fee";
pub const DEFAULT_CREATION_FEE: &str = "0";

/// Parse a stored creation-fee value.
///
/// A malformed value is an operator error and must surface, not silently
/// disable the payment gate.
pub fn parse_fee(raw: &str) -> Result<u64, ParseIntError> {
    raw.trim().parse::<u64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_and_real_fees() {
        assert_eq!(parse_fee(DEFAULT_CREATION_FEE).unwrap(), 0);
        assert_eq!(parse_fee("500").unwrap(), 500);
        assert_eq!(parse_fee(" 250 ").unwrap(), 250);
    }

    #[test]
    fn malformed_fee_is_an_error() {
        assert!(parse_fee("free").is_err());
        assert!(parse_fee("-1").is_err());
        assert!(parse_fee("").is_err());
    }
}
