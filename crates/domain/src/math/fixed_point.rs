use crate::error::MathError;
use primitive_types::{U256, U512};

/// One whole token with 18 decimals, the fixed-point scale used for ratios.
pub const ONE_TOKEN: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// Computes `floor(a * b / denominator)` with a 512-bit intermediate product.
///
/// Returns zero when `denominator` is zero.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Ok(U256::zero());
    }
    let product: U512 = a.full_mul(b);
    let quotient = product / U512::from(denominator);
    U256::try_from(quotient).map_err(|_| MathError::Overflow("mul_div"))
}

/// Ratio between two reserves scaled by `scale`.
///
/// formula: floor(numerator_reserve * scale / denominator_reserve)
///
/// The result reads as "one unit of the denominator token is worth
/// `ratio / scale` units of the numerator token". A zero denominator yields
/// zero.
pub fn ratio_with_scale(
    numerator_reserve: U256,
    denominator_reserve: U256,
    scale: U256,
) -> Result<U256, MathError> {
    mul_div(numerator_reserve, scale, denominator_reserve)
}

/// [`ratio_with_scale`] at the 10^18 scale.
pub fn fixed_point_ratio(
    numerator_reserve: U256,
    denominator_reserve: U256,
) -> Result<U256, MathError> {
    ratio_with_scale(numerator_reserve, denominator_reserve, ONE_TOKEN)
}

/// Converts `amount` through a 10^18-scaled ratio: floor(amount * ratio / 10^18).
pub fn apply_ratio(amount: U256, ratio: U256) -> Result<U256, MathError> {
    mul_div(amount, ratio, ONE_TOKEN)
}
