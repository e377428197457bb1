use crate::token::{Address, TokenAmount};
use serde::{Deserialize, Serialize};

/// Reserves of a two-token pool at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    pub reserve_a: TokenAmount,
    pub reserve_b: TokenAmount,
}

impl ReserveSnapshot {
    pub fn new(reserve_a: impl Into<TokenAmount>, reserve_b: impl Into<TokenAmount>) -> Self {
        Self {
            reserve_a: reserve_a.into(),
            reserve_b: reserve_b.into(),
        }
    }
}

/// Reserves tagged with the pair's token addresses, ordered as the pair
/// contract reports them (`token0`, `token1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairReserves {
    pub pair_address: Address,
    pub token0: Address,
    pub token1: Address,
    pub reserves: ReserveSnapshot,
}

impl PairReserves {
    pub fn new(
        pair_address: Address,
        token0: Address,
        token1: Address,
        reserves: ReserveSnapshot,
    ) -> Self {
        Self {
            pair_address,
            token0,
            token1,
            reserves,
        }
    }

    pub fn involves_token(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// Reserve held for `token`, or `None` if the pair does not contain it.
    pub fn reserve_of(&self, token: &Address) -> Option<TokenAmount> {
        if self.token0 == *token {
            Some(self.reserves.reserve_a)
        } else if self.token1 == *token {
            Some(self.reserves.reserve_b)
        } else {
            None
        }
    }
}
