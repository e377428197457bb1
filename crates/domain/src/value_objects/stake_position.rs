use crate::token::TokenAmount;
use serde::{Deserialize, Serialize};

/// One account's and one pool's staking state.
///
/// `staked_amount <= total_staked_amount` only holds when both come from the
/// same block; reads taken at different heights may violate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    pub staked_amount: TokenAmount,
    pub total_staked_amount: TokenAmount,
    pub total_supply_of_stake_token: TokenAmount,
}

impl StakePosition {
    pub fn new(
        staked_amount: TokenAmount,
        total_staked_amount: TokenAmount,
        total_supply_of_stake_token: TokenAmount,
    ) -> Self {
        Self {
            staked_amount,
            total_staked_amount,
            total_supply_of_stake_token,
        }
    }

    pub fn has_stake(&self) -> bool {
        !self.staked_amount.is_zero()
    }
}
