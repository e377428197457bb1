pub mod apr;
pub mod liquidity;
pub mod reward_rate;
pub mod staked_value;

pub use apr::{ExchangeProjection, SECONDS_PER_YEAR, annual_percentage_rate};
pub use liquidity::{liquidity_value, pool_share_percent};
pub use reward_rate::{individual_reward_rate, pool_reward_rate, reward_rate_in_staking_token};
pub use staked_value::{staked_value_in_reference, staked_value_via_hop};
