use super::{from_sol_uint, to_sol_address};
use crate::error::RpcError;
use crate::rpc::RpcProvider;
use alloy_sol_types::sol;
use primitive_types::U256;
use rytell_earn_domain::Address;
use rytell_earn_domain::enums::BlockTag;
use std::sync::Arc;

sol! {
    contract ERC20 {
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
    }
}

/// ERC20 token, including LP tokens and StakingRewards stake balances.
#[derive(Clone)]
pub struct Erc20Contract {
    provider: Arc<RpcProvider>,
    address: Address,
}

impl Erc20Contract {
    pub fn new(provider: Arc<RpcProvider>, address: Address) -> Self {
        Self { provider, address }
    }

    pub async fn total_supply(&self, block: BlockTag) -> Result<U256, RpcError> {
        self.provider
            .call(self.address, &ERC20::totalSupplyCall {}, block)
            .await
            .map(from_sol_uint)
    }

    pub async fn balance_of(&self, account: Address, block: BlockTag) -> Result<U256, RpcError> {
        let call = ERC20::balanceOfCall {
            account: to_sol_address(account),
        };
        self.provider
            .call(self.address, &call, block)
            .await
            .map(from_sol_uint)
    }
}
