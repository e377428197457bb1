use alloy_primitives::U256 as AlloyU256;
use alloy_primitives::utils::format_units;
use primitive_types::{H160, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// EVM account or contract address.
pub type Address = H160;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    pub name: String,
}

impl Token {
    pub fn new(
        address: Address,
        symbol: impl Into<String>,
        decimals: u8,
        name: impl Into<String>,
    ) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            decimals,
            name: name.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Raw on-chain amount, in the token's smallest unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(pub U256);

impl TokenAmount {
    pub fn new(amount: impl Into<U256>) -> Self {
        Self(amount.into())
    }

    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Adds two amounts, saturating at `U256::MAX`.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Converts to whole tokens. `None` if the amount exceeds `Decimal` range.
    pub fn to_decimal(&self, decimals: u8) -> Option<Decimal> {
        let raw = Decimal::from_str(&self.0.to_string()).ok()?;
        let divisor = Decimal::from(10u64.checked_pow(decimals as u32)?);
        raw.checked_div(divisor)
    }

    /// Formats the amount with `decimals` fractional digits, truncated to
    /// `precision` places.
    pub fn to_fixed(&self, decimals: u8, precision: u8) -> String {
        let Ok(formatted) = format_units(<AlloyU256 as From<TokenAmount>>::from(*self), decimals) else {
            return self.0.to_string();
        };
        let (int_part, frac_part) = formatted
            .split_once('.')
            .unwrap_or((formatted.as_str(), ""));
        let precision = if decimals == 0 {
            0
        } else {
            (precision as usize).min(frac_part.len())
        };
        if precision == 0 {
            int_part.to_string()
        } else {
            format!("{}.{}", int_part, &frac_part[..precision])
        }
    }
}

impl From<u64> for TokenAmount {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<u128> for TokenAmount {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl From<U256> for TokenAmount {
    fn from(v: U256) -> Self {
        Self(v)
    }
}

impl From<AlloyU256> for TokenAmount {
    fn from(v: AlloyU256) -> Self {
        Self(U256(v.into_limbs()))
    }
}

impl From<TokenAmount> for AlloyU256 {
    fn from(v: TokenAmount) -> Self {
        AlloyU256::from_limbs(v.0.0)
    }
}

impl Add for TokenAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
