use ethers::types::U256;

use crate::errors::AmountError;

/// Decimal digits that always fit in a U256 (10^77 < 2^256).
///
/// Tokens with more decimals than this can only be burned in amounts of
/// zero, which validation then reports as below the minimum.
const MAX_U256_DIGITS: usize = 77;

/// Convert a display-unit amount (e.g. "12.5") into base units.
///
/// Parsing is done on the decimal string so no precision is lost to floats.
/// Input with more fractional digits than the token supports is rejected
/// instead of being silently truncated.
///
/// # Errors
/// Returns an error for empty, negative, non-numeric, over-precise or
/// overflowing input.
pub fn to_base_units(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative);
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(AmountError::NotANumber(trimmed.to_string()));
    }
    // Trailing zeros after the point carry no precision.
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(AmountError::TooPrecise { decimals });
    }

    let whole = whole.trim_start_matches('0');
    if whole.is_empty() && fraction.is_empty() {
        return Ok(U256::zero());
    }
    if whole.len() + decimals as usize > MAX_U256_DIGITS {
        return Err(AmountError::Overflow);
    }

    let normalized = match (whole.is_empty(), fraction.is_empty()) {
        (_, true) => whole.to_string(),
        (true, false) => format!("0.{}", fraction),
        (false, false) => format!("{}.{}", whole, fraction),
    };
    ethers::utils::parse_units(normalized, decimals as u32)
        .map(Into::into)
        .map_err(|_| AmountError::Overflow)
}

/// Format base units as a display amount without trailing zeros ("10", "0.5").
pub fn format_units_trimmed(base: U256, decimals: u8) -> String {
    // ethers only knows up to 77 decimals
    let formatted = ethers::utils::format_units(base, decimals as u32)
        .unwrap_or_else(|_| shift_decimal_point(base, decimals));
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Format base units for people: trimmed and grouped by thousands
/// ("1,234,567.25").
pub fn format_display_amount(base: U256, decimals: u8) -> String {
    let plain = format_units_trimmed(base, decimals);
    let (whole, fraction) = match plain.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (plain.as_str(), None),
    };
    let grouped = group_thousands(whole);
    match fraction {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}

fn shift_decimal_point(base: U256, decimals: u8) -> String {
    let digits = base.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }
    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    format!("{}.{}", whole, fraction)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== to_base_units tests ====================

    #[test]
    fn test_to_base_units_whole_number() {
        let result = to_base_units("50", 9).unwrap();
        assert_eq!(result, U256::from(50_000_000_000u64));
    }

    #[test]
    fn test_to_base_units_fractional() {
        let result = to_base_units("0.5", 2).unwrap();
        assert_eq!(result, U256::from(50u64));
    }

    #[test]
    fn test_to_base_units_zero_decimals() {
        assert_eq!(to_base_units("42", 0).unwrap(), U256::from(42u64));
    }

    #[test]
    fn test_to_base_units_leading_dot_and_trailing_dot() {
        assert_eq!(to_base_units(".25", 2).unwrap(), U256::from(25u64));
        assert_eq!(to_base_units("3.", 2).unwrap(), U256::from(300u64));
    }

    #[test]
    fn test_to_base_units_with_whitespace() {
        let result = to_base_units("  1.5  ", 1).unwrap();
        assert_eq!(result, U256::from(15u64));
    }

    #[test]
    fn test_to_base_units_high_precision_is_exact() {
        let result = to_base_units("0.123456789012345678", 18).unwrap();
        assert_eq!(result, U256::from(123456789012345678u64));
    }

    #[test]
    fn test_to_base_units_zero() {
        assert_eq!(to_base_units("0.000", 9).unwrap(), U256::zero());
    }

    #[test]
    fn test_to_base_units_empty_fails() {
        assert_eq!(to_base_units("   ", 9), Err(AmountError::Empty));
    }

    #[test]
    fn test_to_base_units_negative_fails() {
        assert_eq!(to_base_units("-1", 9), Err(AmountError::Negative));
    }

    #[test]
    fn test_to_base_units_not_a_number_fails() {
        assert!(matches!(to_base_units("abc", 9), Err(AmountError::NotANumber(_))));
        assert!(matches!(to_base_units("1.2.3", 9), Err(AmountError::NotANumber(_))));
        assert!(matches!(to_base_units("1e9", 9), Err(AmountError::NotANumber(_))));
        assert!(matches!(to_base_units(".", 9), Err(AmountError::NotANumber(_))));
    }

    #[test]
    fn test_to_base_units_too_precise_fails() {
        assert_eq!(
            to_base_units("0.001", 2),
            Err(AmountError::TooPrecise { decimals: 2 })
        );
    }

    #[test]
    fn test_to_base_units_trailing_zeros_are_not_precision() {
        assert_eq!(to_base_units("5.0", 0).unwrap(), U256::from(5u64));
        assert_eq!(to_base_units("1.50", 1).unwrap(), U256::from(15u64));
        assert_eq!(to_base_units("007.2500", 2).unwrap(), U256::from(725u64));
        assert_eq!(
            to_base_units("1.050", 1),
            Err(AmountError::TooPrecise { decimals: 1 })
        );
    }

    #[test]
    fn test_to_base_units_zero_with_extra_zeros() {
        assert_eq!(to_base_units("0.00", 0).unwrap(), U256::zero());
        assert_eq!(to_base_units("0.0000000000", 9).unwrap(), U256::zero());
    }

    #[test]
    fn test_to_base_units_beyond_u256_decimals() {
        assert_eq!(to_base_units("0", 80).unwrap(), U256::zero());
        assert_eq!(to_base_units("1", 80), Err(AmountError::Overflow));
    }

    #[test]
    fn test_to_base_units_overflow_fails() {
        let huge = "9".repeat(80);
        assert_eq!(to_base_units(&huge, 0), Err(AmountError::Overflow));
    }

    // ==================== formatting tests ====================

    #[test]
    fn test_format_units_trimmed_whole() {
        assert_eq!(format_units_trimmed(U256::from(1000u64), 2), "10");
    }

    #[test]
    fn test_format_units_trimmed_fraction() {
        assert_eq!(format_units_trimmed(U256::from(1_500_000_000u64), 9), "1.5");
    }

    #[test]
    fn test_format_units_trimmed_zero() {
        assert_eq!(format_units_trimmed(U256::zero(), 9), "0");
    }

    #[test]
    fn test_format_units_trimmed_no_decimals() {
        assert_eq!(format_units_trimmed(U256::from(700u64), 0), "700");
    }

    #[test]
    fn test_format_units_trimmed_beyond_u256_decimals() {
        let expected = format!("0.{}15", "0".repeat(77));
        assert_eq!(format_units_trimmed(U256::from(150u64), 80), expected);
        assert_eq!(format_units_trimmed(U256::zero(), 80), "0");
    }

    #[test]
    fn test_format_display_amount_groups_thousands() {
        let base = U256::from(1_234_567_250u64);
        assert_eq!(format_display_amount(base, 3), "1,234,567.25");
    }

    #[test]
    fn test_format_display_amount_small() {
        assert_eq!(format_display_amount(U256::from(100u64), 0), "100");
        assert_eq!(format_display_amount(U256::from(1000u64), 0), "1,000");
    }
}
