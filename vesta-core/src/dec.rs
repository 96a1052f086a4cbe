//! Fixed-precision decimal arithmetic.
//!
//! `Dec` is an unsigned decimal with exactly 18 fractional places, stored
//! as a scaled [`U256`]. Every truncating operation rounds toward zero at
//! the 18th place; the reward engine relies on that direction to guarantee
//! a delegator can never be paid more than accrued. Floating point is
//! never used.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecError;
use crate::u256::U256;

/// Number of fractional decimal places.
pub const DECIMAL_PLACES: u32 = 18;

/// Scale factor: 10^18. Fits in a single u64 limb.
const SCALE: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// Unsigned fixed-precision decimal with 18 fractional places.
///
/// All ledger quantities (stake, reward ratios, pool balances) are
/// non-negative by construction, so the type is unsigned; a subtraction
/// that would go negative is reported through [`Dec::checked_sub`]
/// returning `None` rather than wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dec(U256);

impl Dec {
    /// The decimal zero.
    #[inline]
    pub const fn zero() -> Self {
        Dec(U256([0, 0, 0, 0]))
    }

    /// The decimal one.
    #[inline]
    pub const fn one() -> Self {
        Dec(SCALE)
    }

    /// The smallest representable positive decimal (10^-18).
    #[inline]
    pub const fn smallest() -> Self {
        Dec(U256([1, 0, 0, 0]))
    }

    /// Create a decimal from a whole-unit integer amount.
    #[inline]
    pub fn from_int(value: U256) -> Self {
        Dec(value * SCALE)
    }

    /// Create a decimal from a u64 whole-unit amount.
    #[inline]
    pub fn from_u64(value: u64) -> Self {
        Dec(U256::from(value) * SCALE)
    }

    /// Check whether the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Add two decimals.
    #[inline]
    pub fn add(&self, other: &Dec) -> Dec {
        Dec(self.0 + other.0)
    }

    /// Subtract, returning `None` if the result would be negative.
    #[inline]
    pub fn checked_sub(&self, other: &Dec) -> Option<Dec> {
        if other.0 > self.0 {
            None
        } else {
            Some(Dec(self.0 - other.0))
        }
    }

    /// Multiply two decimals, truncating toward zero at the 18th place.
    ///
    /// Note: the intermediate product can overflow for values near the
    /// top of the 256-bit range. Ledger quantities are far below that.
    pub fn mul_truncate(&self, other: &Dec) -> Dec {
        Dec(self.0 * other.0 / SCALE)
    }

    /// Multiply by an integer. Exact, no rounding involved.
    #[inline]
    pub fn mul_int(&self, value: U256) -> Dec {
        Dec(self.0 * value)
    }

    /// Divide two decimals, rounding the 18th place half up.
    ///
    /// This is the standard (non-truncating) division used for the
    /// single-shot share-to-token conversion.
    pub fn quo(&self, other: &Dec) -> Dec {
        // Compute with one extra digit of precision, then round it away.
        let widened = self.0 * SCALE * U256::from(10u64);
        let quotient = widened / other.0;
        Dec((quotient + U256::from(5u64)) / U256::from(10u64))
    }

    /// Divide two decimals, truncating toward zero at the 18th place.
    pub fn quo_truncate(&self, other: &Dec) -> Dec {
        Dec(self.0 * SCALE / other.0)
    }

    /// Divide by an integer, truncating toward zero. Exact scale math:
    /// dividing the scaled representation directly truncates correctly.
    #[inline]
    pub fn quo_int_truncate(&self, value: U256) -> Dec {
        Dec(self.0 / value)
    }

    /// Whole-unit part, truncating the fractional places toward zero.
    #[inline]
    pub fn truncate(&self) -> U256 {
        self.0 / SCALE
    }

    /// Fractional part left behind by [`Dec::truncate`].
    #[inline]
    pub fn fractional(&self) -> Dec {
        Dec(self.0 % SCALE)
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        // The fractional part is below 10^18 and always fits a u64.
        let frac = frac.to_u64().unwrap_or(0);
        write!(f, "{}.{:018}", whole, frac)
    }
}

impl FromStr for Dec {
    type Err = DecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecError::Malformed { input: s.to_string() });
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecError::Malformed { input: s.to_string() });
        }
        if frac.len() > DECIMAL_PLACES as usize {
            return Err(DecError::TooManyFractionalDigits { digits: frac.len() });
        }

        let mut value = U256::from_dec_str(whole)
            .map_err(|_| DecError::Malformed { input: s.to_string() })?
            * SCALE;

        if !frac.is_empty() {
            let frac_value = U256::from_dec_str(frac)
                .map_err(|_| DecError::Malformed { input: s.to_string() })?;
            let shift = DECIMAL_PLACES as usize - frac.len();
            let mut scale = U256::from(1u64);
            for _ in 0..shift {
                scale = scale * U256::from(10u64);
            }
            value = value + frac_value * scale;
        }

        Ok(Dec(value))
    }
}
