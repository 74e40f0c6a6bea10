//! Human-readable size strings.
//!
//! Sizes are written as a decimal number immediately followed by a unit:
//! `12.5mb`, `1,500kb`, `2GB`. Units are decimal (1 kb = 1000 bytes), not
//! binary. Commas in the integer part are treated as thousands separators.

use crate::error::{CoreError, CoreResult};

const UNITS: [(&str, u64); 4] = [
    ("kb", 1_000),
    ("mb", 1_000_000),
    ("gb", 1_000_000_000),
    ("tb", 1_000_000_000_000),
];

/// Parses a size string such as `"12.5mb"` into a byte count.
///
/// Surrounding whitespace is ignored. Fractional bytes are truncated, so
/// `"0.0015kb"` parses to `1`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidSize`] for anything that is not exactly
/// `<number><unit>`: an empty string, a missing or unknown unit, trailing
/// characters, more than one decimal point, or a value that does not fit
/// in a `u64`.
pub fn parse_size(input: &str) -> CoreResult<u64> {
    let invalid = || CoreError::InvalidSize(input.to_string());
    let trimmed = input.trim();

    if trimmed.len() < 3 || !trimmed.is_char_boundary(trimmed.len() - 2) {
        return Err(invalid());
    }
    let (number, unit) = trimmed.split_at(trimmed.len() - 2);
    let multiplier = UNITS
        .iter()
        .find(|(name, _)| unit.eq_ignore_ascii_case(name))
        .map(|(_, multiplier)| *multiplier)
        .ok_or_else(invalid)?;

    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };
    let whole: String = whole.chars().filter(|c| *c != ',').collect();

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };

    // Only as many fractional digits as the multiplier can resolve matter.
    let significant = fraction.len().min(multiplier.ilog10() as usize);
    let fraction_value: u128 = if significant == 0 {
        0
    } else {
        fraction[..significant].parse().map_err(|_| invalid())?
    };
    let fraction_bytes = fraction_value * u128::from(multiplier) / 10u128.pow(significant as u32);

    let total = whole_value
        .checked_mul(u128::from(multiplier))
        .and_then(|bytes| bytes.checked_add(fraction_bytes))
        .ok_or_else(invalid)?;
    u64::try_from(total).map_err(|_| invalid())
}

/// Returns true when `input` is a valid size string.
pub fn is_valid_size(input: &str) -> bool {
    parse_size(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("1kb").unwrap(), 1_000);
        assert_eq!(parse_size("1mb").unwrap(), 1_000_000);
        assert_eq!(parse_size("1gb").unwrap(), 1_000_000_000);
        assert_eq!(parse_size("1tb").unwrap(), 1_000_000_000_000);
    }

    #[test]
    fn test_parse_size_case_insensitive() {
        assert_eq!(parse_size("5MB").unwrap(), 5_000_000);
        assert_eq!(parse_size("5Mb").unwrap(), 5_000_000);
        assert_eq!(parse_size("3GB").unwrap(), 3_000_000_000);
    }

    #[test]
    fn test_parse_size_fractional() {
        assert_eq!(parse_size("12.5mb").unwrap(), 12_500_000);
        assert_eq!(parse_size(".5kb").unwrap(), 500);
        assert_eq!(parse_size("0.29kb").unwrap(), 290);
        assert_eq!(parse_size("1.1gb").unwrap(), 1_100_000_000);
        // Digits below one byte are dropped
        assert_eq!(parse_size("0.0015kb").unwrap(), 1);
        assert_eq!(parse_size("2.kb").unwrap(), 2_000);
    }

    #[test]
    fn test_parse_size_thousands_separators() {
        assert_eq!(parse_size("1,500kb").unwrap(), 1_500_000);
        assert_eq!(parse_size("12,500,000kb").unwrap(), 12_500_000_000);
        assert_eq!(parse_size("1,000.5mb").unwrap(), 1_000_500_000);
    }

    #[test]
    fn test_parse_size_whitespace_is_trimmed() {
        assert_eq!(parse_size("  5mb \n").unwrap(), 5_000_000);
    }

    #[test]
    fn test_parse_size_rejects_malformed() {
        for input in [
            "", "mb", "5", "5 mb", "5mib", "5mbx", "5m", "abc", "1.2.3mb", "-5mb", "5b", "five mb",
            "5mb5", ",mb", ".mb", "é5mb",
        ] {
            assert!(
                matches!(parse_size(input), Err(CoreError::InvalidSize(_))),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_size_overflow() {
        assert!(parse_size("99999999999999999999tb").is_err());
        assert!(parse_size("18446744073709552kb").is_err());
    }

    #[test]
    fn test_is_valid_size() {
        assert!(is_valid_size("12.5mb"));
        assert!(!is_valid_size("12.5"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// `1234567` -> `1,234,567`
        fn with_separators(value: u64) -> String {
            let digits = value.to_string();
            let mut grouped = String::new();
            for (i, digit) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(digit);
            }
            grouped
        }

        fn unit() -> impl Strategy<Value = (&'static str, u64)> {
            prop::sample::select(UNITS.to_vec())
        }

        /// The unit with each letter independently upper- or lower-cased.
        fn spell(unit: &str, upper: (bool, bool)) -> String {
            unit.chars()
                .zip([upper.0, upper.1])
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn whole_sizes_scale_by_unit(
                number in 0u64..10_000_000,
                (name, multiplier) in unit(),
                upper in any::<(bool, bool)>(),
                grouped in any::<bool>(),
            ) {
                let written = if grouped { with_separators(number) } else { number.to_string() };
                let input = format!("{}{}", written, spell(name, upper));
                prop_assert_eq!(parse_size(&input).unwrap(), number * multiplier);
            }

            #[test]
            fn fractional_sizes_truncate_below_one_byte(
                number in 0u64..1_000_000,
                fraction in "[0-9]{1,3}",
                (name, multiplier) in unit(),
            ) {
                let input = format!("{number}.{fraction}{name}");
                let fraction_value: u64 = fraction.parse().unwrap();
                let scale = 10u64.pow(fraction.len() as u32);
                let expected = number * multiplier + fraction_value * multiplier / scale;
                prop_assert_eq!(parse_size(&input).unwrap(), expected);
            }

            #[test]
            fn arbitrary_text_never_panics(input in any::<String>()) {
                let _ = parse_size(&input);
            }

            #[test]
            fn size_like_text_never_panics(input in "[0-9.,kmgtbKMGTB \u{e9}]{0,16}") {
                let parsed = parse_size(&input);
                prop_assert_eq!(parsed.is_ok(), is_valid_size(&input));
            }
        }
    }
}
