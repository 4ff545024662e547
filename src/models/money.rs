//! Money type for representing currency amounts
//!
//! Internally stores amounts in hundredths of the currency unit (i64) to avoid
//! floating-point drift when summing journals. Record tables persist amounts
//! as plain decimal text (`100000`, `2500.50`) so they stay readable by other
//! spreadsheet tools.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Currency symbol (Indonesian rupiah)
pub const SYMBOL: &str = "Rp";

/// Largest whole-unit amount a single record may carry
///
/// Keeps every sum over a user's tables far away from `i64` overflow.
pub const MAX_UNITS: i64 = 10_000_000_000_000;

/// Represents a monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use farmbook::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.units(), 10);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use farmbook::models::Money;
    /// let amount = Money::from_units(100_000);
    /// assert_eq!(amount.cents(), 10_000_000);
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// The largest amount a single record may carry
    pub const fn max_amount() -> Self {
        Self(MAX_UNITS * 100)
    }

    /// Check whether the amount lies within `±max_amount()`
    pub const fn is_within_limit(&self) -> bool {
        self.0.unsigned_abs() <= (MAX_UNITS * 100) as u64
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the hundredths portion (0-99)
    pub const fn cents_part(&self) -> i64 {
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

    /// Amount as a floating-point number of units, for ratios only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "100000", "100000.50", "-250", "Rp100000", "Rp 2500.5".
    /// Amounts beyond [`MAX_UNITS`] are out of range.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix(SYMBOL).unwrap_or(s).trim_start();
        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let cents = if let Some((whole, frac)) = s.split_once('.') {
            if !is_digits(whole) || !(frac.is_empty() || is_digits(frac)) {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }

            let units: i64 = whole
                .parse()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

            // Pad or truncate the fraction to 2 digits
            let cents: i64 = match frac.len() {
                0 => 0,
                1 => frac[..1].parse::<i64>().unwrap_or(0) * 10,
                _ => frac[..2].parse().unwrap_or(0),
            };

            units
                .checked_mul(100)
                .and_then(|c| c.checked_add(cents))
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        } else {
            if !is_digits(s) {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }
            s.parse::<i64>()
                .ok()
                .and_then(|units| units.checked_mul(100))
                .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?
        };

        let money = Self(if negative { -cents } else { cents });
        if !money.is_within_limit() {
            return Err(MoneyParseError::OutOfRange(s.to_string()));
        }
        Ok(money)
    }

    /// Plain decimal text as persisted in record tables
    ///
    /// Whole amounts are written without a fraction (`100000`), others with
    /// two digits (`2500.50`).
    pub fn to_plain_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        if self.cents_part() == 0 {
            format!("{}{}", sign, self.units().abs())
        } else {
            format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
        }
    }

    /// Format with a currency symbol and thousands separators
    fn format_with_symbol(&self, symbol: &str) -> String {
        let grouped = group_thousands(self.units().abs());
        let fraction = if self.cents_part() == 0 {
            String::new()
        } else {
            format!(".{:02}", self.cents_part())
        };
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{} {}{}", sign, symbol, grouped, fraction)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol(SYMBOL))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_plain_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Money::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let m = Money::from_units(100_000);
        assert_eq!(m.cents(), 10_000_000);
        assert_eq!(m.units(), 100_000);
        assert_eq!(m.cents_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(100_000).to_string(), "Rp 100,000");
        assert_eq!(Money::from_cents(123_450).to_string(), "Rp 1,234.50");
        assert_eq!(Money::from_units(-5_000).to_string(), "-Rp 5,000");
        assert_eq!(Money::zero().to_string(), "Rp 0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((-a).units(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("100000").unwrap(), Money::from_units(100_000));
        assert_eq!(Money::parse("Rp 2500.5").unwrap().cents(), 250_050);
        assert_eq!(Money::parse("Rp100").unwrap().cents(), 10_000);
        assert_eq!(Money::parse("-10.25").unwrap().cents(), -1025);
        assert_eq!(Money::parse("100000.0").unwrap(), Money::from_units(100_000));
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_rejects_amounts_beyond_limit() {
        assert_eq!(
            Money::parse("10000000000000").unwrap(),
            Money::max_amount()
        );
        assert_eq!(
            Money::parse("10000000000000.01"),
            Err(MoneyParseError::OutOfRange("10000000000000.01".into()))
        );
        assert!(Money::parse("92233720368547758").is_err());
        assert!(Money::parse("-92233720368547758").is_err());
    }

    #[test]
    fn test_sums_never_overflow() {
        let huge = Money::from_cents(i64::MAX - 1);
        let total: Money = vec![huge, huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!((-huge - huge).cents(), i64::MIN);
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_units(100_000).to_plain_string(), "100000");
        assert_eq!(Money::from_cents(250_050).to_plain_string(), "2500.50");
        assert_eq!(Money::from_cents(-5).to_plain_string(), "-0.05");
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_units(100),
            Money::from_units(200),
            Money::from_units(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.units(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"10.50\"");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
