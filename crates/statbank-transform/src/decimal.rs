//! Fixed-point decimal text.
//!
//! Values are rounded on their decimal digits, never through binary floating
//! point, so `3.005` rounds to `3.01` as written rather than to the nearest
//! double.

/// A parsed decimal number: sign, integer digits and fraction digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    negative: bool,
    integer: Vec<u8>,
    fraction: Vec<u8>,
}

impl Decimal {
    /// Parses plain decimal text with `.` or `,` as separator.
    ///
    /// Returns `None` for blanks, exponents, thousands separators and
    /// anything else that is not `[+-]digits[sep digits]`.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (integer, fraction) = match unsigned.find(['.', ',']) {
            Some(idx) => (&unsigned[..idx], &unsigned[idx + 1..]),
            None => (unsigned, ""),
        };
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }
        let digits = |s: &str| -> Option<Vec<u8>> {
            s.bytes()
                .map(|b| b.is_ascii_digit().then(|| b - b'0'))
                .collect()
        };
        let mut integer = digits(integer)?;
        let fraction = digits(fraction)?;

        let leading = integer.iter().take_while(|&&d| d == 0).count();
        integer.drain(..leading);
        Some(Self {
            negative,
            integer,
            fraction,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.integer.iter().chain(&self.fraction).all(|&d| d == 0)
    }

    /// Rounds to `decimals` fraction digits, ties away from zero.
    pub fn round_half_up(&self, decimals: usize) -> Self {
        let mut fraction = self.fraction.clone();
        if fraction.len() <= decimals {
            fraction.resize(decimals, 0);
            return Self {
                negative: self.negative,
                integer: self.integer.clone(),
                fraction,
            };
        }

        let round_up = fraction[decimals] >= 5;
        fraction.truncate(decimals);
        let mut digits: Vec<u8> = self.integer.iter().copied().chain(fraction).collect();
        if round_up {
            increment(&mut digits);
        }
        let split = digits.len() - decimals;
        let fraction = digits.split_off(split);
        let leading = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..leading);
        Self {
            negative: self.negative,
            integer: digits,
            fraction,
        }
    }

    /// Renders with a comma separator. No separator when there is no fraction.
    /// Zero is never signed.
    pub fn to_comma_string(&self) -> String {
        let mut out = String::with_capacity(self.integer.len() + self.fraction.len() + 2);
        if self.negative && !self.is_zero() {
            out.push('-');
        }
        if self.integer.is_empty() {
            out.push('0');
        } else {
            out.extend(self.integer.iter().map(|d| char::from(b'0' + d)));
        }
        if !self.fraction.is_empty() {
            out.push(',');
            out.extend(self.fraction.iter().map(|d| char::from(b'0' + d)));
        }
        out
    }
}

/// Adds one unit in the last place, growing the number on overflow.
fn increment(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

/// Rounds decimal text to `decimals` places and renders it with a comma.
///
/// Returns `None` when the text is not a plain decimal number.
///
/// ```
/// use statbank_transform::round_text;
///
/// assert_eq!(round_text("2.5", 0).as_deref(), Some("3"));
/// assert_eq!(round_text("3.005", 2).as_deref(), Some("3,01"));
/// assert_eq!(round_text("3,01", 2).as_deref(), Some("3,01"));
/// assert_eq!(round_text("..", 2), None);
/// ```
pub fn round_text(text: &str, decimals: u32) -> Option<String> {
    let decimal = Decimal::parse(text)?;
    Some(decimal.round_half_up(decimals as usize).to_comma_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(round_text("2.5", 0).as_deref(), Some("3"));
        assert_eq!(round_text("3.5", 0).as_deref(), Some("4"));
        assert_eq!(round_text("-2.5", 0).as_deref(), Some("-3"));
        assert_eq!(round_text("0.125", 2).as_deref(), Some("0,13"));
    }

    #[test]
    fn below_half_rounds_down() {
        assert_eq!(round_text("2.49", 0).as_deref(), Some("2"));
        assert_eq!(round_text("1.15", 1).as_deref(), Some("1,2"));
        assert_eq!(round_text("1.14999", 1).as_deref(), Some("1,1"));
    }

    #[test]
    fn carry_propagates() {
        assert_eq!(round_text("9.995", 2).as_deref(), Some("10,00"));
        assert_eq!(round_text("99.5", 0).as_deref(), Some("100"));
        assert_eq!(round_text("0.96", 1).as_deref(), Some("1,0"));
    }

    #[test]
    fn pads_to_declared_decimals() {
        assert_eq!(round_text("3", 2).as_deref(), Some("3,00"));
        assert_eq!(round_text("0.5", 3).as_deref(), Some("0,500"));
        assert_eq!(round_text("007", 0).as_deref(), Some("7"));
        assert_eq!(round_text(".5", 1).as_deref(), Some("0,5"));
    }

    #[test]
    fn zero_is_unsigned() {
        assert_eq!(round_text("-0.001", 2).as_deref(), Some("0,00"));
        assert_eq!(round_text("-0", 0).as_deref(), Some("0"));
    }

    #[test]
    fn non_decimals_are_rejected() {
        assert_eq!(round_text("", 1), None);
        assert_eq!(round_text("1e5", 1), None);
        assert_eq!(round_text("1 000", 0), None);
        assert_eq!(round_text(":", 0), None);
    }
}
