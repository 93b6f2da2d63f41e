use anyhow::{ensure, Context};
use num::BigUint;

/// Formats an integer token amount as a decimal string with `decimals` fractional digits.
/// Trailing zeros of the fraction are dropped, so `format_units(1_500_000, 6)` is `"1.5"`.
pub fn format_units(amount: &BigUint, decimals: u8) -> String {
    let digits = amount.to_str_radix(10);
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }
    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

/// Inverse of [`format_units`]: parses a human readable decimal into the integer amount.
pub fn parse_units(value: &str, decimals: u8) -> anyhow::Result<BigUint> {
    let value = value.trim();
    ensure!(!value.is_empty(), "empty amount string");
    let (int_part, frac_part) = match value.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (value, ""),
    };
    ensure!(
        frac_part.len() <= decimals as usize,
        "too many fractional digits in {value}, at most {decimals} allowed"
    );
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let digits = format!("{int_part}{frac_part:0<width$}", width = decimals as usize);
    ensure!(
        digits.bytes().all(|b| b.is_ascii_digit()),
        "invalid amount string {value}"
    );
    BigUint::parse_bytes(digits.as_bytes(), 10)
        .with_context(|| format!("invalid amount string {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Zero;

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(&BigUint::from(1_500_000u32), 6), "1.5");
        assert_eq!(format_units(&BigUint::from(5u32), 6), "0.000005");
        assert_eq!(format_units(&BigUint::from(10u32), 0), "10");
        assert_eq!(format_units(&BigUint::from(3_000_000u32), 6), "3");
        assert_eq!(format_units(&BigUint::zero(), 18), "0");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1.5", 6).unwrap(), BigUint::from(1_500_000u32));
        assert_eq!(parse_units(".25", 2).unwrap(), BigUint::from(25u32));
        assert_eq!(parse_units("42", 0).unwrap(), BigUint::from(42u32));
        assert!(parse_units("1.2345", 2).is_err());
        assert!(parse_units("1e5", 2).is_err());
        assert!(parse_units("-1", 2).is_err());
        assert!(parse_units("", 2).is_err());
    }
}
