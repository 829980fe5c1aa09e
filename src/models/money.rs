//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (øre, cents) as i64 to avoid
//! floating-point precision issues. Provides safe arithmetic, parsing,
//! display, and rate-based conversion between currencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A monetary amount stored in minor units (hundredths of the currency unit)
///
/// The currency itself is tracked separately; `Money` is just the signed
/// quantity. i64 minor units support amounts up to roughly 92 quadrillion
/// whole units in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use kassebog::models::Money;
    /// let amount = Money::from_minor(1050); // 10.50
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a Money amount from whole units
    ///
    /// # Examples
    /// ```
    /// use kassebog::models::Money;
    /// let amount = Money::from_whole(18_000); // 18000.00
    /// ```
    pub const fn from_whole(whole: i64) -> Self {
        Self(whole * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Get the whole-unit portion (truncated toward zero)
    pub const fn whole(&self) -> i64 {
        self.0 / 100
    }

    /// Get the minor-unit portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by an exchange rate, rounding half away from zero to the
    /// nearest minor unit
    pub fn convert(&self, rate: f64) -> Self {
        Self((self.0 as f64 * rate).round() as i64)
    }

    /// Divide by a scalar, rounding half away from zero to the nearest
    /// minor unit
    pub fn div_f64(&self, divisor: f64) -> Self {
        Self((self.0 as f64 / divisor).round() as i64)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "+10.50", "18,000.50",
    /// "1'234.56", "(25.00)" for accounting-style negatives, and bare
    /// integers as whole units. Extra decimal digits beyond two are
    /// truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s;
        let s = s.trim();

        // (10.50) is an accounting-style negative
        let (parenthesized, s) = match s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
            Some(inner) => (true, inner.trim()),
            None => (false, s),
        };

        let (explicit_negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };
        let negative = parenthesized || explicit_negative;

        // Thousands separators carry no information
        let s = s.replace([',', '\''], "");

        // The sign was consumed above; a leftover one is malformed input
        if s.contains('-') || s.contains('+') {
            return Err(MoneyParseError::InvalidFormat(raw.to_string()));
        }

        let minor = if s.contains('.') {
            // Decimal format: "10.50"
            let parts: Vec<&str> = s.split('.').collect();
            if parts.len() != 2 {
                return Err(MoneyParseError::InvalidFormat(raw.to_string()));
            }

            let whole: i64 = parts[0]
                .parse()
                .map_err(|_| MoneyParseError::InvalidFormat(raw.to_string()))?;

            // Pad or truncate the fraction to 2 digits
            let fraction_str = parts[1];
            let fraction: i64 = match fraction_str.len() {
                0 => 0,
                1 => {
                    fraction_str
                        .parse::<i64>()
                        .map_err(|_| MoneyParseError::InvalidFormat(raw.to_string()))?
                        * 10
                }
                _ => fraction_str[..2]
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(raw.to_string()))?,
            };

            whole * 100 + fraction
        } else {
            // Integer format - whole units
            s.parse::<i64>()
                .map_err(|_| MoneyParseError::InvalidFormat(raw.to_string()))?
                * 100
        };

        Ok(Self(if negative { -minor } else { minor }))
    }

    /// Format with thousands grouping
    ///
    /// # Examples
    /// ```
    /// use kassebog::models::Money;
    /// assert_eq!(Money::from_minor(-1_800_050).format_grouped(), "-18,000.50");
    /// ```
    pub fn format_grouped(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}.{:02}",
            sign,
            group_thousands(self.whole().abs()),
            self.minor_part()
        )
    }

    /// Format with thousands grouping and a currency code suffix
    ///
    /// # Examples
    /// ```
    /// use kassebog::models::Money;
    /// assert_eq!(Money::from_minor(1_800_000).format_with_code("DKK"), "18,000.00 DKK");
    /// ```
    pub fn format_with_code(&self, code: &str) -> String {
        format!("{} {}", self.format_grouped(), code)
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.whole().abs(), self.minor_part())
        } else {
            write!(f, "{}.{:02}", self.whole(), self.minor_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, factor: i64) -> Self {
        Self(self.0 * factor)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let m = Money::from_minor(1050);
        assert_eq!(m.minor(), 1050);
        assert_eq!(m.whole(), 10);
        assert_eq!(m.minor_part(), 50);
    }

    #[test]
    fn test_from_whole() {
        let m = Money::from_whole(18_000);
        assert_eq!(m.minor(), 1_800_000);
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Money::default(), Money::zero());
        assert!(Money::default().is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_minor(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_minor(0)), "0.00");
        assert_eq!(format!("{}", Money::from_minor(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_minor(5)), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((-a).minor(), -1000);
        assert_eq!((a * 3).minor(), 3000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().minor(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().minor(), -1050);
        assert_eq!(Money::parse("10").unwrap().minor(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().minor(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().minor(), 5);
        assert_eq!(Money::parse("18,000.25").unwrap().minor(), 1_800_025);
        assert!(Money::parse("abc").is_err());
    }

    #[test]
    fn test_parse_sign_variants() {
        assert_eq!(Money::parse("+10.50").unwrap().minor(), 1050);
        assert_eq!(Money::parse("(25.00)").unwrap().minor(), -2500);
        assert_eq!(Money::parse("( 25.00 )").unwrap().minor(), -2500);
        assert_eq!(Money::parse("1'234.56").unwrap().minor(), 123_456);
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("5-3").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("()").is_err());
    }

    #[test]
    fn test_convert() {
        // 100.00 EUR at 7.44 -> 744.00
        assert_eq!(Money::from_minor(10_000).convert(7.44).minor(), 74_400);
        // Rounds half away from zero in both directions
        assert_eq!(Money::from_minor(1).convert(0.5).minor(), 1);
        assert_eq!(Money::from_minor(-1).convert(0.5).minor(), -1);
        // Identity rate preserves the amount exactly
        assert_eq!(Money::from_minor(123_456).convert(1.0).minor(), 123_456);
    }

    #[test]
    fn test_div_f64() {
        // 21000.00 / 4.33 -> 4849.88 (rounded)
        assert_eq!(Money::from_whole(21_000).div_f64(4.33).minor(), 484_988);
    }

    #[test]
    fn test_format_with_code() {
        assert_eq!(Money::from_minor(123_456).format_with_code("DKK"), "1,234.56 DKK");
        assert_eq!(Money::from_minor(-50_00).format_with_code("EUR"), "-50.00 EUR");
        assert_eq!(Money::from_minor(0).format_with_code("DKK"), "0.00 DKK");
    }

    #[test]
    fn test_comparison() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);
        let c = Money::from_minor(1000);

        assert!(a > b);
        assert!(b < a);
        assert_eq!(a, c);
    }

    #[test]
    fn test_is_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_minor(100).is_positive());
        assert!(Money::from_minor(-100).is_negative());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_minor(100),
            Money::from_minor(200),
            Money::from_minor(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.minor(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_minor(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
