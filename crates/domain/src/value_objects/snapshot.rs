use crate::entities::StakingPool;
use crate::token::TokenAmount;
use crate::value_objects::read_state::ReadState;
use crate::value_objects::reserves::PairReserves;
use serde::{Deserialize, Serialize};

/// Raw reads gathered for one pool during one pass.
///
/// Which fields are required depends on the pool kind; unused fields stay
/// `Pending` and are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub pool: StakingPool,
    /// Account stake; `None` when no account is connected.
    pub staked_amount: Option<ReadState<TokenAmount>>,
    /// Account rewards; `None` when no account is connected.
    pub earned_amount: Option<ReadState<TokenAmount>>,
    pub total_staked: ReadState<TokenAmount>,
    pub reward_rate: ReadState<TokenAmount>,
    pub period_finish: ReadState<u64>,
    /// Total supply of the staked LP token.
    pub stake_token_supply: ReadState<TokenAmount>,
    /// Underlying pair; `Ready(None)` when the pair does not exist.
    pub pair: ReadState<Option<PairReserves>>,
    /// MiniChef allocation points.
    pub alloc_point: ReadState<TokenAmount>,
    /// Value of one whole staking token in reward-token units (single-sided).
    pub staking_token_value: ReadState<TokenAmount>,
}

impl PoolSnapshot {
    pub fn pending(pool: StakingPool) -> Self {
        Self {
            pool,
            staked_amount: None,
            earned_amount: None,
            total_staked: ReadState::Pending,
            reward_rate: ReadState::Pending,
            period_finish: ReadState::Pending,
            stake_token_supply: ReadState::Pending,
            pair: ReadState::Pending,
            alloc_point: ReadState::Pending,
            staking_token_value: ReadState::Pending,
        }
    }
}

/// MiniChef-wide emission parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniChefState {
    pub reward_per_second: TokenAmount,
    pub total_alloc_point: TokenAmount,
    pub rewards_expiration: u64,
}

/// Reads shared by every pool in a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Reference/intermediate pair (WAVAX/RADI); `Ready(None)` if it does not exist.
    pub hop_pair: ReadState<Option<PairReserves>>,
    /// Reference/USD pair used to price the reference asset.
    pub quote_pair: ReadState<Option<PairReserves>>,
    pub minichef: ReadState<MiniChefState>,
}
