//! # Money
//!
//! Daily prices and rental totals as whole minor units (cents) in an `i64`.
//!
//! ```text
//!   typed by the manager    "500,000.50"
//!   Money::parse         →  Money(50_000_050)
//!   × 3 days             →  Money(150_000_150)       exact, no f64 drift
//!   Display              →  "1500001.50"
//!   render::Currency     →  "Rp 1,500,001.50"         (fleet-cli)
//! ```
//!
//! Floats appear only in [`Money::as_major_f64`], which feeds the price
//! distribution in the statistics screen.
//!
//! ```rust
//! use fleet_core::money::Money;
//!
//! let price = Money::parse("350000.50").unwrap();
//! assert_eq!(price.cents(), 35_000_050);
//! assert_eq!(price.multiply_days(3).to_string(), "1050001.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// An amount of money in minor units. Signed so that a negative price can
/// be parsed and then rejected with a proper message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units.
    ///
    /// ```rust
    /// use fleet_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(500_000).cents(), 50_000_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Parses a decimal amount typed by a user.
    ///
    /// ## Accepted Input
    /// - `500000`, `500000.5`, `500000.50`, `-12.00`
    /// - `_` and `,` are accepted as digit group separators (`500,000`)
    ///
    /// More than two fractional digits is rejected rather than rounded.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();
        if cleaned.is_empty() {
            return Err(ValidationError::required("amount"));
        }

        let (negative, unsigned) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.as_str()),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a number"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a number"));
        }
        if fraction.len() > 2 {
            return Err(invalid("at most 2 decimal places"));
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("expected a number"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("expected a number"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount in major units as a float, for statistics only.
    #[inline]
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a daily price by a number of days.
    ///
    /// ```rust
    /// use fleet_core::money::Money;
    ///
    /// let daily = Money::from_major(350_000);
    /// assert_eq!(daily.multiply_days(3), Money::from_major(1_050_000));
    /// ```
    #[inline]
    pub const fn multiply_days(&self, days: i64) -> Self {
        // saturates instead of wrapping on absurd day counts
        Money(self.0.saturating_mul(days))
    }

    /// Arithmetic mean of a set of amounts, rounded half away from zero to
    /// the nearest minor unit.
    ///
    /// Returns `None` for an empty set: there is no mean of nothing.
    pub fn mean<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        let (sum, count) = amounts
            .into_iter()
            .fold((0_i128, 0_i128), |(sum, count), m| (sum + m.0 as i128, count + 1));

        if count == 0 {
            return None;
        }

        let half = count / 2;
        let rounded = if sum >= 0 {
            (sum + half) / count
        } else {
            (sum - half) / count
        };
        Some(Money(rounded as i64))
    }
}

/// Plain decimal rendering (`500000.00`). Currency symbols and digit grouping
/// belong to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}
