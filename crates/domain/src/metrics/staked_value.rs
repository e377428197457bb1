use crate::error::MathError;
use crate::math::fixed_point::{apply_ratio, fixed_point_ratio};
use primitive_types::{U256, U512};

/// An LP share entitles its holder to both sides of the pool, each side
/// nominally equal in value, so one reserve counts twice.
const POOL_SIDES: u64 = 2;

/// Value of the staked LP tokens in units of a token the pool holds directly.
///
/// formula: floor(total_staked * reserve_of_reference * 2 / total_supply)
///
/// Returns zero when `total_supply` is zero.
pub fn staked_value_in_reference(
    total_staked: U256,
    total_supply: U256,
    reserve_of_reference: U256,
) -> Result<U256, MathError> {
    if total_supply.is_zero() {
        return Ok(U256::zero());
    }
    let overflow = MathError::Overflow("staked_value_in_reference");
    let pool_value = total_staked
        .full_mul(reserve_of_reference)
        .checked_mul(U512::from(POOL_SIDES))
        .ok_or(overflow)?;
    U256::try_from(pool_value / U512::from(total_supply)).map_err(|_| overflow)
}

/// Value of the staked LP tokens in the reference asset when the pool holds
/// an intermediate asset instead.
///
/// The pool's intermediate reserve is first priced through the
/// intermediate/reference pair:
///   ratio = floor(10^18 * hop_reserve_reference / hop_reserve_intermediate)
///   reserve_in_reference = floor(pool_reserve_of_intermediate * ratio / 10^18)
/// and then valued as in [`staked_value_in_reference`].
pub fn staked_value_via_hop(
    total_staked: U256,
    total_supply: U256,
    pool_reserve_of_intermediate: U256,
    hop_reserve_intermediate: U256,
    hop_reserve_reference: U256,
) -> Result<U256, MathError> {
    if total_supply.is_zero() {
        return Ok(U256::zero());
    }
    let ratio = fixed_point_ratio(hop_reserve_reference, hop_reserve_intermediate)?;
    let reserve_in_reference = apply_ratio(pool_reserve_of_intermediate, ratio)?;
    staked_value_in_reference(total_staked, total_supply, reserve_in_reference)
}
