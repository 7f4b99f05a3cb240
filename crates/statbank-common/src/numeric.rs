//! Decimal text inspection.

/// Number of digits after the decimal separator in a plain decimal number.
///
/// Accepts `.` or `,` as separator and an optional sign. Returns `None` for
/// text that is not a plain decimal (blank, letters, exponents).
///
/// ```
/// use statbank_common::fraction_digits;
///
/// assert_eq!(fraction_digits("3.005"), Some(3));
/// assert_eq!(fraction_digits("3,01"), Some(2));
/// assert_eq!(fraction_digits("-12"), Some(0));
/// assert_eq!(fraction_digits(".."), None);
/// ```
pub fn fraction_digits(value: &str) -> Option<usize> {
    let trimmed = value.trim();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    let (integer, fraction) = match unsigned.find(['.', ',']) {
        Some(idx) => (&unsigned[..idx], &unsigned[idx + 1..]),
        None => (unsigned, ""),
    };
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if digits_only(integer) && digits_only(fraction) {
        Some(fraction.len())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_fraction_digits() {
        assert_eq!(fraction_digits("1"), Some(0));
        assert_eq!(fraction_digits("1.50"), Some(2));
        assert_eq!(fraction_digits(" 2,5 "), Some(1));
        assert_eq!(fraction_digits("+0.125"), Some(3));
        assert_eq!(fraction_digits(".5"), Some(1));
    }

    #[test]
    fn rejects_non_decimals() {
        assert_eq!(fraction_digits(""), None);
        assert_eq!(fraction_digits("-"), None);
        assert_eq!(fraction_digits("1e-5"), None);
        assert_eq!(fraction_digits("1.2.3"), None);
        assert_eq!(fraction_digits("abc"), None);
    }
}
