use crate::token::{Address, Token, TokenAmount};
use crate::value_objects::price::QuotedAmount;
use crate::value_objects::remote_apr::RemoteApr;
use crate::value_objects::reward_schedule::RewardSchedule;
use crate::value_objects::stake_position::StakePosition;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Per-pool record rendered by the Earn and Stake pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolViewModel {
    pub pool_id: String,
    pub label: String,
    pub staking_address: Address,
    /// Pair tokens, or the reward token for single-sided pools.
    pub tokens: Vec<Token>,
    pub stake: StakePosition,
    pub schedule: RewardSchedule,
    pub is_period_finished: bool,
    pub earned_amount: TokenAmount,
    /// Pool emission per second; zero once the period finished.
    pub total_reward_rate: TokenAmount,
    /// Account share of `total_reward_rate`.
    pub individual_reward_rate: TokenAmount,
    /// Total staked value in the reference asset (WAVAX).
    pub staked_value_in_reference: TokenAmount,
    pub staked_value_in_usd: Option<QuotedAmount>,
    pub multiplier: U256,
    /// On-chain APR in percent, single-sided pools only.
    pub apr: Option<U256>,
    /// Attached after aggregation by APR enrichment.
    pub remote_apr: Option<RemoteApr>,
}
