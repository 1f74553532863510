//! Multi-asset amounts.
//!
//! Amounts are represented as integers (u128) in the asset's smallest unit. A [`Coins`]
//! set is always normalized: sorted by denom, one entry per denom, no zero entries.
//! Its string form (`"1000000uatom,5uusdc"`) is what the total-forwarded key space stores.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single asset amount.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TypesError::InvalidCoins(s.to_string()))?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() {
            return Err(TypesError::InvalidCoins(s.to_string()));
        }
        let amount = amount
            .parse::<u128>()
            .map_err(|_| TypesError::InvalidCoins(s.to_string()))?;
        let denom = denom.trim();
        validate_denom(denom)?;
        Ok(Self::new(amount, denom))
    }
}

/// Check a denom against the host's denom grammar: `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), TypesError> {
    let mut chars = denom.chars();
    let valid_first = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if !valid_first || !valid_rest || !(3..=128).contains(&denom.len()) {
        return Err(TypesError::InvalidDenom(denom.to_string()));
    }
    Ok(())
}

/// A normalized set of coins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a normalized set, merging duplicate denoms and dropping zero amounts.
    pub fn from_coins(coins: impl IntoIterator<Item = Coin>) -> Self {
        let mut set = Self::new();
        for coin in coins {
            set.add_coin(coin);
        }
        set
    }

    /// Add a single coin, keeping the set sorted by denom.
    ///
    /// Amounts saturate at `u128::MAX`; a counter that large is not reachable in practice.
    pub fn add_coin(&mut self, coin: Coin) {
        if coin.is_zero() {
            return;
        }
        match self.0.binary_search_by(|c| c.denom.as_str().cmp(&coin.denom)) {
            Ok(idx) => {
                let existing = &mut self.0[idx];
                existing.amount = existing.amount.saturating_add(coin.amount);
            }
            Err(idx) => self.0.insert(idx, coin),
        }
    }

    /// Merge another set into this one.
    pub fn add(&mut self, other: &Coins) {
        for coin in other.iter() {
            self.add_coin(coin.clone());
        }
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    /// Subtract `other`, failing if any denom would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut result = self.clone();
        for coin in other.iter() {
            let idx = result
                .0
                .binary_search_by(|c| c.denom.as_str().cmp(&coin.denom))
                .ok()?;
            let remaining = result.0[idx].amount.checked_sub(coin.amount)?;
            if remaining == 0 {
                result.0.remove(idx);
            } else {
                result.0[idx].amount = remaining;
            }
        }
        Some(result)
    }
}

impl IntoIterator for Coins {
    type Item = Coin;
    type IntoIter = std::vec::IntoIter<Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Coin::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromStr for Coins {
    type Err = TypesError;

    /// Parse a comma-separated list into a normalized set. The empty string is the empty set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::new());
        }
        let coins = s
            .split(',')
            .map(Coin::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_coins(coins))
    }
}
