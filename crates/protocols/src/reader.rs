//! The read seam between contract wrappers and the snapshot loader.

use crate::contracts::{
    Erc20Contract, FactoryContract, MiniChefContract, PairContract, RouterContract,
    StakingRewardsContract,
};
use crate::error::RpcError;
use crate::rpc::RpcProvider;
use async_trait::async_trait;
use rytell_earn_domain::enums::BlockTag;
use rytell_earn_domain::value_objects::{MiniChefState, PairReserves};
use rytell_earn_domain::{Address, TokenAmount};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Every chain read an aggregation pass needs.
///
/// Arguments are taken by value so the trait can be mocked.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait StakingReader: Send + Sync {
    /// `balanceOf(account)` on an ERC20 or StakingRewards contract.
    async fn balance_of(
        &self,
        contract: Address,
        account: Address,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError>;

    /// `totalSupply()` on an ERC20 or StakingRewards contract.
    async fn total_supply(&self, contract: Address, block: BlockTag)
    -> Result<TokenAmount, RpcError>;

    async fn earned(
        &self,
        staking: Address,
        account: Address,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError>;

    async fn reward_rate(&self, staking: Address, block: BlockTag) -> Result<TokenAmount, RpcError>;

    async fn period_finish(&self, staking: Address, block: BlockTag) -> Result<u64, RpcError>;

    /// Reserves of the pair for two tokens, `None` if the factory has no pair.
    async fn pair_reserves(
        &self,
        token_a: Address,
        token_b: Address,
        block: BlockTag,
    ) -> Result<Option<PairReserves>, RpcError>;

    /// Reserves of a pair at a known address.
    async fn pair_at(&self, pair: Address, block: BlockTag) -> Result<PairReserves, RpcError>;

    /// Pair address for two tokens, `None` if the factory has no pair.
    async fn pair_address(
        &self,
        token_a: Address,
        token_b: Address,
        block: BlockTag,
    ) -> Result<Option<Address>, RpcError>;

    async fn chef_alloc_point(&self, pid: u64, block: BlockTag) -> Result<TokenAmount, RpcError>;

    async fn chef_staked(
        &self,
        pid: u64,
        account: Address,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError>;

    async fn chef_pending_reward(
        &self,
        pid: u64,
        account: Address,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError>;

    async fn chef_state(&self, block: BlockTag) -> Result<MiniChefState, RpcError>;

    /// Router quote for `amount_in` along `path`, last hop only.
    async fn amount_out(
        &self,
        amount_in: TokenAmount,
        path: Vec<Address>,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError>;

    /// The MiniChef contract holding LP tokens for MiniChef pools.
    fn minichef_address(&self) -> Address;
}

/// Exchange-wide contract addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub factory: Address,
    pub router: Address,
    pub minichef: Address,
}

/// [`StakingReader`] backed by `eth_call`.
pub struct ChainStakingReader {
    provider: Arc<RpcProvider>,
    addresses: ContractAddresses,
}

impl ChainStakingReader {
    pub fn new(provider: Arc<RpcProvider>, addresses: ContractAddresses) -> Self {
        Self {
            provider,
            addresses,
        }
    }

    fn staking(&self, address: Address) -> StakingRewardsContract {
        StakingRewardsContract::new(self.provider.clone(), address)
    }

    fn minichef(&self) -> MiniChefContract {
        MiniChefContract::new(self.provider.clone(), self.addresses.minichef)
    }

    fn factory(&self) -> FactoryContract {
        FactoryContract::new(self.provider.clone(), self.addresses.factory)
    }
}

#[async_trait]
impl StakingReader for ChainStakingReader {
    async fn balance_of(
        &self,
        contract: Address,
        account: Address,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError> {
        Erc20Contract::new(self.provider.clone(), contract)
            .balance_of(account, block)
            .await
            .map(TokenAmount::from)
    }

    async fn total_supply(
        &self,
        contract: Address,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError> {
        Erc20Contract::new(self.provider.clone(), contract)
            .total_supply(block)
            .await
            .map(TokenAmount::from)
    }

    async fn earned(
        &self,
        staking: Address,
        account: Address,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError> {
        self.staking(staking)
            .earned(account, block)
            .await
            .map(TokenAmount::from)
    }

    async fn reward_rate(&self, staking: Address, block: BlockTag) -> Result<TokenAmount, RpcError> {
        self.staking(staking)
            .reward_rate(block)
            .await
            .map(TokenAmount::from)
    }

    async fn period_finish(&self, staking: Address, block: BlockTag) -> Result<u64, RpcError> {
        self.staking(staking).period_finish(block).await
    }

    async fn pair_reserves(
        &self,
        token_a: Address,
        token_b: Address,
        block: BlockTag,
    ) -> Result<Option<PairReserves>, RpcError> {
        match self.pair_address(token_a, token_b, block).await? {
            Some(pair) => self.pair_at(pair, block).await.map(Some),
            None => {
                debug!(token_a = ?token_a, token_b = ?token_b, "Pair does not exist");
                Ok(None)
            }
        }
    }

    async fn pair_at(&self, pair: Address, block: BlockTag) -> Result<PairReserves, RpcError> {
        PairContract::new(self.provider.clone(), pair)
            .reserves(block)
            .await
    }

    async fn pair_address(
        &self,
        token_a: Address,
        token_b: Address,
        block: BlockTag,
    ) -> Result<Option<Address>, RpcError> {
        self.factory().get_pair(token_a, token_b, block).await
    }

    async fn chef_alloc_point(&self, pid: u64, block: BlockTag) -> Result<TokenAmount, RpcError> {
        self.minichef()
            .alloc_point(pid, block)
            .await
            .map(TokenAmount::from)
    }

    async fn chef_staked(
        &self,
        pid: u64,
        account: Address,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError> {
        self.minichef()
            .staked(pid, account, block)
            .await
            .map(TokenAmount::from)
    }

    async fn chef_pending_reward(
        &self,
        pid: u64,
        account: Address,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError> {
        self.minichef()
            .pending_reward(pid, account, block)
            .await
            .map(TokenAmount::from)
    }

    async fn chef_state(&self, block: BlockTag) -> Result<MiniChefState, RpcError> {
        let chef = self.minichef();
        let (reward_per_second, total_alloc_point, rewards_expiration) = futures::try_join!(
            chef.reward_per_second(block),
            chef.total_alloc_point(block),
            chef.rewards_expiration(block),
        )?;
        Ok(MiniChefState {
            reward_per_second: reward_per_second.into(),
            total_alloc_point: total_alloc_point.into(),
            rewards_expiration,
        })
    }

    async fn amount_out(
        &self,
        amount_in: TokenAmount,
        path: Vec<Address>,
        block: BlockTag,
    ) -> Result<TokenAmount, RpcError> {
        RouterContract::new(self.provider.clone(), self.addresses.router)
            .amount_out(amount_in.as_u256(), path, block)
            .await
            .map(TokenAmount::from)
    }

    fn minichef_address(&self) -> Address {
        self.addresses.minichef
    }
}
