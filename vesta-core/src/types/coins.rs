//! Coin amounts, integer and decimal, keyed by denomination.
//!
//! `Coins` carries whole-unit integer amounts as actually paid out;
//! `DecCoins` carries 18-place decimal amounts as tracked inside the
//! reward ledger. Both keep their entries sorted by denomination and
//! free of zero amounts, so equality and subtraction behave like the
//! multiset operations they represent. The one exception is an explicit
//! zero placeholder coin used to make empty payouts observable.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dec::Dec;
use crate::types::denomination::{denomination_to_string, Denomination};
use crate::u256::U256;

/// A whole-unit amount of a single denomination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Token denomination.
    pub denom: Denomination,
    /// Whole-unit amount.
    pub amount: U256,
}

impl Coin {
    /// Create a coin.
    pub fn new(denom: Denomination, amount: U256) -> Self {
        Coin { denom, amount }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, denomination_to_string(&self.denom))
    }
}

/// A set of whole-unit coins, sorted by denomination, no zero entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// The empty set.
    pub fn new() -> Self {
        Coins(Vec::new())
    }

    /// Build from an unordered list, merging duplicates and dropping zeros.
    pub fn from_coins(coins: Vec<Coin>) -> Self {
        let mut result = Coins::new();
        for coin in coins {
            result.add_coin(coin);
        }
        result
    }

    /// A single zero-amount coin.
    ///
    /// Zero entries are normally stripped; this constructor exists for
    /// settlement notifications, which report a well-formed zero coin of
    /// the base denomination when nothing was paid.
    pub fn zero_placeholder(denom: Denomination) -> Self {
        Coins(vec![Coin::new(denom, U256::from(0u64))])
    }

    /// Whether the set holds no entries (a zero placeholder still counts
    /// as an entry).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.amount.is_zero())
    }

    /// Amount of the given denomination, zero if absent.
    pub fn amount_of(&self, denom: &Denomination) -> U256 {
        match self.0.binary_search_by(|c| c.denom.cmp(denom)) {
            Ok(i) => self.0[i].amount,
            Err(_) => U256::from(0u64),
        }
    }

    /// Add a single coin in place.
    pub fn add_coin(&mut self, coin: Coin) {
        if coin.amount.is_zero() {
            return;
        }
        match self.0.binary_search_by(|c| c.denom.cmp(&coin.denom)) {
            Ok(i) => self.0[i].amount = self.0[i].amount + coin.amount,
            Err(i) => self.0.insert(i, coin),
        }
    }

    /// Sum of two sets.
    pub fn add(&self, other: &Coins) -> Coins {
        let mut result = self.clone();
        for coin in &other.0 {
            result.add_coin(*coin);
        }
        result
    }

    /// Subtract, returning `None` if any denomination would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut result = Vec::new();
        for coin in &self.0 {
            let sub = other.amount_of(&coin.denom);
            if sub > coin.amount {
                return None;
            }
            let remaining = coin.amount - sub;
            if !remaining.is_zero() {
                result.push(Coin::new(coin.denom, remaining));
            }
        }
        for coin in &other.0 {
            if !coin.amount.is_zero() && self.amount_of(&coin.denom).is_zero() {
                return None;
            }
        }
        Some(Coins(result))
    }

    /// Iterate over the entries in denomination order.
    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    /// Lift whole-unit amounts into the decimal domain. Exact.
    pub fn to_dec_coins(&self) -> DecCoins {
        let mut result = DecCoins::new();
        for coin in &self.0 {
            result.add_coin(DecCoin::new(coin.denom, Dec::from_int(coin.amount)));
        }
        result
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(empty)");
        }
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", coin)?;
        }
        Ok(())
    }
}

/// A decimal amount of a single denomination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecCoin {
    /// Token denomination.
    pub denom: Denomination,
    /// 18-place decimal amount.
    pub amount: Dec,
}

impl DecCoin {
    /// Create a decimal coin.
    pub fn new(denom: Denomination, amount: Dec) -> Self {
        DecCoin { denom, amount }
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, denomination_to_string(&self.denom))
    }
}

/// A set of decimal coins, sorted by denomination, no zero entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecCoins(Vec<DecCoin>);

impl DecCoins {
    /// The empty set.
    pub fn new() -> Self {
        DecCoins(Vec::new())
    }

    /// Build from an unordered list, merging duplicates and dropping zeros.
    pub fn from_coins(coins: Vec<DecCoin>) -> Self {
        let mut result = DecCoins::new();
        for coin in coins {
            result.add_coin(coin);
        }
        result
    }

    /// Whether the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every amount is zero. Equivalent to [`DecCoins::is_empty`]
    /// under the no-zero-entries invariant.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.amount.is_zero())
    }

    /// Amount of the given denomination, zero if absent.
    pub fn amount_of(&self, denom: &Denomination) -> Dec {
        match self.0.binary_search_by(|c| c.denom.cmp(denom)) {
            Ok(i) => self.0[i].amount,
            Err(_) => Dec::zero(),
        }
    }

    /// Add a single decimal coin in place.
    pub fn add_coin(&mut self, coin: DecCoin) {
        if coin.amount.is_zero() {
            return;
        }
        match self.0.binary_search_by(|c| c.denom.cmp(&coin.denom)) {
            Ok(i) => self.0[i].amount = self.0[i].amount.add(&coin.amount),
            Err(i) => self.0.insert(i, coin),
        }
    }

    /// Sum of two sets.
    pub fn add(&self, other: &DecCoins) -> DecCoins {
        let mut result = self.clone();
        for coin in &other.0 {
            result.add_coin(*coin);
        }
        result
    }

    /// Subtract, returning `None` if any denomination would go negative.
    pub fn checked_sub(&self, other: &DecCoins) -> Option<DecCoins> {
        let mut result = Vec::new();
        for coin in &self.0 {
            let sub = other.amount_of(&coin.denom);
            let remaining = coin.amount.checked_sub(&sub)?;
            if !remaining.is_zero() {
                result.push(DecCoin::new(coin.denom, remaining));
            }
        }
        for coin in &other.0 {
            if !coin.amount.is_zero() && self.amount_of(&coin.denom).is_zero() {
                return None;
            }
        }
        Some(DecCoins(result))
    }

    /// Per-denomination minimum of two sets.
    ///
    /// Denominations absent from either side contribute nothing, so
    /// intersecting a claim against a pool clips the claim to what the
    /// pool can actually cover.
    pub fn intersect(&self, other: &DecCoins) -> DecCoins {
        let mut result = DecCoins::new();
        for coin in &self.0 {
            let cap = other.amount_of(&coin.denom);
            let amount = if coin.amount < cap { coin.amount } else { cap };
            result.add_coin(DecCoin::new(coin.denom, amount));
        }
        result
    }

    /// Multiply every amount by a decimal factor, truncating each.
    pub fn mul_dec_truncate(&self, factor: &Dec) -> DecCoins {
        let mut result = DecCoins::new();
        for coin in &self.0 {
            result.add_coin(DecCoin::new(coin.denom, coin.amount.mul_truncate(factor)));
        }
        result
    }

    /// Divide every amount by an integer, truncating each.
    pub fn quo_int_truncate(&self, value: U256) -> DecCoins {
        let mut result = DecCoins::new();
        for coin in &self.0 {
            result.add_coin(DecCoin::new(coin.denom, coin.amount.quo_int_truncate(value)));
        }
        result
    }

    /// Split into payable whole units and the decimal remainder.
    ///
    /// The returned remainder is what each amount loses to truncation;
    /// summing the two halves reconstructs the original set exactly.
    pub fn truncate_decimal(&self) -> (Coins, DecCoins) {
        let mut whole = Coins::new();
        let mut remainder = DecCoins::new();
        for coin in &self.0 {
            whole.add_coin(Coin::new(coin.denom, coin.amount.truncate()));
            remainder.add_coin(DecCoin::new(coin.denom, coin.amount.fractional()));
        }
        (whole, remainder)
    }

    /// Iterate over the entries in denomination order.
    pub fn iter(&self) -> impl Iterator<Item = &DecCoin> {
        self.0.iter()
    }
}

impl fmt::Display for DecCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(empty)");
        }
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", coin)?;
        }
        Ok(())
    }
}
