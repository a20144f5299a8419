//! Minor-unit money helpers
//!
//! All amounts in Tally are integer cents. These helpers convert between
//! cents and the dollar strings shown to users or read from CSV files.

use crate::error::{Error, Result};

/// Cents per major currency unit
pub const CENTS_PER_UNIT: i64 = 100;

/// Format cents as a dollar string with thousands separators (e.g. `$1,234.56`)
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = (abs / CENTS_PER_UNIT as u64).to_string();
    let frac = abs % CENTS_PER_UNIT as u64;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Parse a decimal dollar string into cents without going through floats
///
/// Accepts an optional leading `-`, an optional `$`, comma separators and up
/// to two fractional digits: `12`, `12.3`, `$1,204.56`, `-4.10`.
pub fn parse_cents(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest).replace(',', "");

    let invalid = || Error::InvalidData(format!("Invalid amount: {}", input));

    let (whole_str, frac_str) = match rest.split_once('.') {
        Some((w, f)) => (w, f),
        None => (rest.as_str(), ""),
    };

    if whole_str.is_empty() && frac_str.is_empty() {
        return Err(invalid());
    }
    if frac_str.len() > 2
        || !whole_str.chars().all(|c| c.is_ascii_digit())
        || !frac_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole: i64 = if whole_str.is_empty() {
        0
    } else {
        whole_str.parse().map_err(|_| invalid())?
    };
    let frac: i64 = match frac_str.len() {
        0 => 0,
        1 => frac_str.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac_str.parse().map_err(|_| invalid())?,
    };

    let cents = whole
        .checked_mul(CENTS_PER_UNIT)
        .and_then(|c| c.checked_add(frac))
        .ok_or_else(invalid)?;

    Ok(if negative { -cents } else { cents })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(123456), "$1,234.56");
        assert_eq!(format_cents(100000000), "$1,000,000.00");
        assert_eq!(format_cents(-2500), "-$25.00");
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("12").unwrap(), 1200);
        assert_eq!(parse_cents("12.3").unwrap(), 1230);
        assert_eq!(parse_cents("12.34").unwrap(), 1234);
        assert_eq!(parse_cents(" $1,204.56 ").unwrap(), 120456);
        assert_eq!(parse_cents(".5").unwrap(), 50);
        assert_eq!(parse_cents("-4.10").unwrap(), -410);
    }

    #[test]
    fn test_parse_cents_rejects_garbage() {
        assert!(parse_cents("").is_err());
        assert!(parse_cents("abc").is_err());
        assert!(parse_cents("1.234").is_err());
        assert!(parse_cents("1.2.3").is_err());
        assert!(parse_cents(".").is_err());
    }
}
