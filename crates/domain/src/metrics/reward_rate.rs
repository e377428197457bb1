use crate::error::MathError;
use crate::math::fixed_point::{ONE_TOKEN, mul_div};
use primitive_types::U256;

/// Share of `total_reward_rate` earned by `staked` out of `total_staked`.
///
/// formula: floor(total_reward_rate * staked / total_staked), zero when
/// nothing is staked. Flooring means the shares of all stakers may add up to
/// slightly less than the total rate.
pub fn individual_reward_rate(
    staked: U256,
    total_staked: U256,
    total_reward_rate: U256,
) -> Result<U256, MathError> {
    if total_staked.is_zero() {
        return Ok(U256::zero());
    }
    mul_div(total_reward_rate, staked, total_staked)
}

/// Emission of one MiniChef pool: floor(alloc_point * reward_per_second / total_alloc_point).
pub fn pool_reward_rate(
    alloc_point: U256,
    total_alloc_point: U256,
    reward_per_second: U256,
) -> Result<U256, MathError> {
    mul_div(alloc_point, reward_per_second, total_alloc_point)
}

/// Converts a reward-token rate into staking-token units given the value of
/// one staking token in reward-token units.
///
/// formula: floor(reward_rate * 10^18 / value_of_staking_token)
pub fn reward_rate_in_staking_token(
    reward_rate: U256,
    value_of_staking_token: Option<U256>,
) -> Result<U256, MathError> {
    match value_of_staking_token {
        Some(value) if !value.is_zero() => mul_div(reward_rate, ONE_TOKEN, value),
        _ => Ok(U256::zero()),
    }
}
