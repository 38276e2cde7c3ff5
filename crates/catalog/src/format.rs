//! Per-keystroke input formatters.
//!
//! All functions here are pure string transforms, safe to call on every
//! keystroke. They never fail: invalid input degrades gracefully (worst case,
//! an empty string). They deliberately do not reject intermediate states —
//! "12." is a fine thing for a price field to contain mid-typing.

/// Normalize raw price input.
///
/// Strips everything but digits and `.`, collapses extra decimal points by
/// concatenating their digits after the first one, and truncates the
/// fractional part to two digits.
pub fn format_price(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let Some((int_part, frac)) = cleaned.split_once('.') else {
        return cleaned;
    };

    // Digits that followed a second/third/... dot fold into the fraction.
    let frac: String = frac.chars().filter(char::is_ascii_digit).collect();
    let frac = &frac[..frac.len().min(2)];
    format!("{int_part}.{frac}")
}

/// Normalize raw SKU input into the progressive `DDD-DDD-DD` mask.
///
/// Strips non-digits, caps at 8 digits, and re-inserts hyphens as digit groups
/// fill up. Idempotent: feeding the output back in reproduces it.
pub fn format_sku(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(8).collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

/// Normalize raw stock input: digits only.
pub fn format_stock(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// True iff `value` is a complete SKU: exactly `DDD-DDD-DD`.
pub fn is_valid_sku(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_truncates_fraction_to_two_digits() {
        assert_eq!(format_price("12.345"), "12.34");
        assert_eq!(format_price("0.999"), "0.99");
    }

    #[test]
    fn price_collapses_extra_decimal_points() {
        assert_eq!(format_price("1..2"), "1.2");
        assert_eq!(format_price("1.2.3"), "1.23");
    }

    #[test]
    fn price_strips_non_numeric_input() {
        assert_eq!(format_price("abc"), "");
        assert_eq!(format_price("$1,299.99"), "1299.99");
    }

    #[test]
    fn price_keeps_intermediate_states() {
        assert_eq!(format_price("12."), "12.");
        assert_eq!(format_price(".5"), ".5");
        assert_eq!(format_price(""), "");
    }

    #[test]
    fn sku_groups_progressively() {
        assert_eq!(format_sku(""), "");
        assert_eq!(format_sku("1"), "1");
        assert_eq!(format_sku("123"), "123");
        assert_eq!(format_sku("1234"), "123-4");
        assert_eq!(format_sku("123456"), "123-456");
        assert_eq!(format_sku("1234567"), "123-456-7");
        assert_eq!(format_sku("12345678"), "123-456-78");
    }

    #[test]
    fn sku_caps_at_eight_digits() {
        assert_eq!(format_sku("1234567890"), "123-456-78");
    }

    #[test]
    fn sku_strips_non_digits() {
        assert_eq!(format_sku("abc123def456"), "123-456");
        assert_eq!(format_sku("123-456-78"), "123-456-78");
    }

    #[test]
    fn stock_strips_non_digits() {
        assert_eq!(format_stock("12a3"), "123");
        assert_eq!(format_stock("-5"), "5");
        assert_eq!(format_stock("abc"), "");
    }

    #[test]
    fn sku_validation_requires_exact_shape() {
        assert!(is_valid_sku("123-456-78"));
        assert!(is_valid_sku("000-000-00"));

        assert!(!is_valid_sku("123-45-678"));
        assert!(!is_valid_sku("123-456-789"));
        assert!(!is_valid_sku("123-456-7"));
        assert!(!is_valid_sku("12a-456-78"));
        assert!(!is_valid_sku(""));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Matches `^\d{0,3}(-\d{0,3}(-\d{0,2})?)?$` without pulling in a
        /// regex engine: hyphen-separated digit groups of width 3, 3, 2.
        fn matches_mask(s: &str) -> bool {
            let groups: Vec<&str> = s.split('-').collect();
            if groups.len() > 3 {
                return false;
            }
            groups.iter().enumerate().all(|(i, g)| {
                let max = if i == 2 { 2 } else { 3 };
                g.len() <= max && g.bytes().all(|b| b.is_ascii_digit())
            })
        }

        proptest! {
            #[test]
            fn format_sku_is_idempotent(raw in ".{0,40}") {
                let once = format_sku(&raw);
                prop_assert_eq!(format_sku(&once), once);
            }

            #[test]
            fn format_sku_output_matches_mask(raw in ".{0,40}") {
                prop_assert!(matches_mask(&format_sku(&raw)));
            }

            #[test]
            fn format_price_never_panics_and_is_clean(raw in ".{0,40}") {
                let out = format_price(&raw);
                prop_assert!(out.chars().all(|c| c.is_ascii_digit() || c == '.'));
                prop_assert!(out.chars().filter(|c| *c == '.').count() <= 1);
                if let Some((_, frac)) = out.split_once('.') {
                    prop_assert!(frac.len() <= 2);
                }
            }

            #[test]
            fn format_stock_output_is_digits_only(raw in ".{0,40}") {
                prop_assert!(format_stock(&raw).bytes().all(|b| b.is_ascii_digit()));
            }

            #[test]
            fn full_sku_masks_validate(digits in "[0-9]{8}") {
                prop_assert!(is_valid_sku(&format_sku(&digits)));
            }
        }
    }
}
