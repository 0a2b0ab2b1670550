//! Fabric quantity derivation
//!
//! The intake sheet records meters of fabric per item and the number of
//! items. The total is derived from those two free-text inputs and is never
//! set directly.

/// Parse a free-text number leniently
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"3.2 m"` reads as `3.2`. Returns `None` when no number can be read.
pub fn parse_lenient(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Optional exponent, only consumed when it is complete.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Total fabric in meters, formatted to two decimals
///
/// An empty string means "not yet entered": it is returned whenever either
/// input is missing, unparsable or zero. A product is only formatted when
/// both inputs are present and non-zero and the product is finite.
pub fn fabric_total(quantity: &str, per_item: &str) -> String {
    let quantity = parse_lenient(quantity).unwrap_or(0.0);
    let per_item = parse_lenient(per_item).unwrap_or(0.0);

    if quantity == 0.0 || per_item == 0.0 {
        return String::new();
    }
    let total = quantity * per_item;
    if !total.is_finite() {
        return String::new();
    }
    format!("{:.2}", total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fabric_total_examples() {
        assert_eq!(fabric_total("3", "2.5"), "7.50");
        assert_eq!(fabric_total("2", "3.1"), "6.20");
        assert_eq!(fabric_total("1", "3.2"), "3.20");
    }

    #[test]
    fn test_fabric_total_empty_vs_zero() {
        assert_eq!(fabric_total("", "2.5"), "");
        assert_eq!(fabric_total("0", "5"), "");
        assert_eq!(fabric_total("4", ""), "");
        assert_eq!(fabric_total("abc", "5"), "");
    }

    #[test]
    fn test_fabric_total_overflow_is_blank() {
        assert_eq!(parse_lenient("1e400"), Some(f64::INFINITY));
        assert_eq!(fabric_total("1e400", "2"), "");
        assert_eq!(fabric_total("1e200", "1e200"), "");
        assert_eq!(fabric_total("Infinity", "2"), "");
    }

    #[test]
    fn test_parse_lenient_prefixes() {
        assert_eq!(parse_lenient("3.2 m"), Some(3.2));
        assert_eq!(parse_lenient("  2"), Some(2.0));
        assert_eq!(parse_lenient(".5"), Some(0.5));
        assert_eq!(parse_lenient("5."), Some(5.0));
        assert_eq!(parse_lenient("1e2x"), Some(100.0));
        assert_eq!(parse_lenient("1e"), Some(1.0));
        assert_eq!(parse_lenient("-1.5"), Some(-1.5));
        assert_eq!(parse_lenient("."), None);
        assert_eq!(parse_lenient(""), None);
        assert_eq!(parse_lenient("m3"), None);
    }
}
