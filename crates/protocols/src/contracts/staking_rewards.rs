use super::{from_sol_uint, to_sol_address};
use crate::error::RpcError;
use crate::rpc::RpcProvider;
use alloy_sol_types::sol;
use primitive_types::U256;
use rytell_earn_domain::Address;
use rytell_earn_domain::enums::BlockTag;
use std::sync::Arc;

sol! {
    contract StakingRewards {
        function earned(address account) external view returns (uint256);
        function rewardRate() external view returns (uint256);
        function periodFinish() external view returns (uint256);
    }
}

/// Synthetix-style StakingRewards contract.
///
/// Stake balances are read through [`super::Erc20Contract`], which shares
/// the `balanceOf` and `totalSupply` selectors.
#[derive(Clone)]
pub struct StakingRewardsContract {
    provider: Arc<RpcProvider>,
    address: Address,
}

impl StakingRewardsContract {
    pub fn new(provider: Arc<RpcProvider>, address: Address) -> Self {
        Self { provider, address }
    }

    /// Rewards accrued to `account` and not yet claimed.
    pub async fn earned(&self, account: Address, block: BlockTag) -> Result<U256, RpcError> {
        let call = StakingRewards::earnedCall {
            account: to_sol_address(account),
        };
        self.provider
            .call(self.address, &call, block)
            .await
            .map(from_sol_uint)
    }

    /// Reward tokens emitted per second to all stakers.
    pub async fn reward_rate(&self, block: BlockTag) -> Result<U256, RpcError> {
        self.provider
            .call(self.address, &StakingRewards::rewardRateCall {}, block)
            .await
            .map(from_sol_uint)
    }

    /// End of the current reward period, unix seconds. Zero before start.
    pub async fn period_finish(&self, block: BlockTag) -> Result<u64, RpcError> {
        let finish = self
            .provider
            .call(self.address, &StakingRewards::periodFinishCall {}, block)
            .await?;
        u64::try_from(finish).map_err(|_| RpcError::OutOfRange("periodFinish"))
    }
}
