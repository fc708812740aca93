//! Pure validation rules for user-entered values.
//!
//! No side effects here: the engine calls these and decides how to re-prompt.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Number of hex characters in an address after the optional `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Whether a string is a plausible Ethereum-style address.
///
/// Accepts surrounding whitespace and an optional `0x` prefix; the remainder
/// must be exactly 40 hexadecimal characters.
#[must_use]
pub fn is_valid_address(addr: &str) -> bool {
    let stripped = strip_prefix(addr.trim());
    stripped.len() == ADDRESS_HEX_LEN && stripped.chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalize a valid address to carry the `0x` prefix.
///
/// Returns `None` when [`is_valid_address`] would reject the input.
#[must_use]
pub fn normalize_address(addr: &str) -> Option<String> {
    if !is_valid_address(addr) {
        return None;
    }
    Some(format!("0x{}", strip_prefix(addr.trim())))
}

fn strip_prefix(addr: &str) -> &str {
    addr.strip_prefix("0x").unwrap_or(addr)
}

/// Parse a user-entered swap amount.
///
/// Accepts any decimal string; rejects non-numeric input and values that are
/// zero or negative. Returns `None` on rejection so the caller re-prompts.
#[must_use]
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let amount = Decimal::from_str(input.trim()).ok()?;
    (amount > Decimal::ZERO).then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // -------------------------------------------------------------------------
    // Address validation
    // -------------------------------------------------------------------------

    #[test]
    fn address_with_prefix_is_valid() {
        let addr = format!("0x{}", "a".repeat(40));
        assert!(is_valid_address(&addr));
    }

    #[test]
    fn address_without_prefix_is_valid() {
        assert!(is_valid_address(&"a".repeat(40)));
    }

    #[test]
    fn address_too_short_is_invalid() {
        assert!(!is_valid_address(&"a".repeat(39)));
        assert!(!is_valid_address(&format!("0x{}", "a".repeat(39))));
    }

    #[test]
    fn address_too_long_is_invalid() {
        assert!(!is_valid_address(&"a".repeat(41)));
    }

    #[test]
    fn address_with_non_hex_is_invalid() {
        assert!(!is_valid_address(&format!("0xg{}", "a".repeat(39))));
    }

    #[test]
    fn address_mixed_case_is_valid() {
        assert!(is_valid_address(
            "0xABCDEF0123456789ABCDEF0123456789ABCDEF01"
        ));
    }

    #[test]
    fn address_surrounding_whitespace_is_tolerated() {
        let addr = format!("  0x{}  ", "b".repeat(40));
        assert!(is_valid_address(&addr));
    }

    #[test]
    fn empty_address_is_invalid() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("0x"));
    }

    #[test]
    fn normalize_adds_prefix() {
        let bare = "c".repeat(40);
        assert_eq!(normalize_address(&bare).unwrap(), format!("0x{bare}"));
    }

    #[test]
    fn normalize_keeps_existing_prefix_once() {
        let addr = format!("0x{}", "d".repeat(40));
        assert_eq!(normalize_address(&addr).unwrap(), addr);
    }

    #[test]
    fn normalize_rejects_invalid() {
        assert!(normalize_address("nope").is_none());
    }

    // -------------------------------------------------------------------------
    // Amount parsing
    // -------------------------------------------------------------------------

    #[test]
    fn positive_amounts_parse() {
        assert_eq!(parse_amount("1.5"), Some(dec!(1.5)));
        assert_eq!(parse_amount("0.5"), Some(dec!(0.5)));
        assert_eq!(parse_amount(" 100 "), Some(dec!(100)));
    }

    #[test]
    fn non_numeric_amount_rejected() {
        assert!(parse_amount("abc").is_none());
        assert!(parse_amount("").is_none());
        assert!(parse_amount("1.2.3").is_none());
    }

    #[test]
    fn non_positive_amount_rejected() {
        assert!(parse_amount("0").is_none());
        assert!(parse_amount("-1").is_none());
        assert!(parse_amount("-0.01").is_none());
    }
}
