use crate::Result;

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoneyError {
    #[error("Overflow error while applying {0} operation on {1} and {2}")]
    Overflow(&'static str, Money, Money),

    #[error("Money parse error: {0}, {1:?}")]
    Parse(&'static str, String),
}

/// An amount of the ledger's single currency, held as a whole number of cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(i64::MAX);
    pub const MIN: Self = Self(i64::MIN);

    const CENTS_PER_UNIT: i64 = 100;

    /// Parses a decimal amount such as `150`, `75.5`, `-0.25` or `.5`.
    ///
    /// Digits past the second decimal place are rounded half away from zero.
    pub fn parse(string: &str) -> Result<Self> {
        let trimmed = string.trim();

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let mut parts = unsigned.split('.');
        let units = parts.next().unwrap_or("");
        let fraction = parts.next();

        if parts.next().is_some() {
            Err(MoneyError::Parse("Too many decimal points", string.to_string()))?
        }

        if units.is_empty() && fraction.map_or(true, str::is_empty) {
            Err(MoneyError::Parse("No digits", string.to_string()))?
        }

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(units) || !fraction.map_or(true, all_digits) {
            Err(MoneyError::Parse("Invalid digits", string.to_string()))?
        }

        let units: i64 = if units.is_empty() { 0 } else { units.parse()? };

        let fraction = fraction.unwrap_or("");
        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map_or(false, |d| d >= 5);

        let cents = units
            .checked_mul(Self::CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(|| MoneyError::Parse("Amount too large", string.to_string()))?;

        return Ok(Money(if negative { -cents } else { cents }));
    }

    pub fn is_positive(&self) -> bool {
        return self.0 > 0;
    }

    pub fn is_negative(&self) -> bool {
        return self.0 < 0;
    }

    pub fn add(&mut self, other: &Self) -> Result {
        let sum = self
            .0
            .checked_add(other.0)
            .ok_or(MoneyError::Overflow("add", *self, *other))?;

        self.0 = sum;

        return Ok(());
    }

    pub fn sub(&mut self, other: &Self) -> Result {
        let difference = self
            .0
            .checked_sub(other.0)
            .ok_or(MoneyError::Overflow("sub", *self, *other))?;

        self.0 = difference;

        return Ok(());
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        let per_unit = Self::CENTS_PER_UNIT as u64;

        return write!(f, "{sign}{}.{:02}", cents / per_unit, cents % per_unit);
    }
}
