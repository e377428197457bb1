use crate::error::MathError;
use crate::math::fixed_point::mul_div;
use crate::token::TokenAmount;
use rust_decimal::Decimal;

/// Account's share of a pool's LP supply, in percent.
///
/// Zero when the pool has no supply or the amounts do not fit a `Decimal`.
pub fn pool_share_percent(user_balance: TokenAmount, total_supply: TokenAmount) -> Decimal {
    if total_supply.is_zero() {
        return Decimal::ZERO;
    }
    match (user_balance.to_decimal(0), total_supply.to_decimal(0)) {
        (Some(user), Some(total)) => user
            .checked_div(total)
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Amount of one pair token redeemable for `user_balance` LP tokens.
///
/// formula: floor(reserve * user_balance / total_supply)
///
/// A balance above the supply means the two reads come from different blocks;
/// the value is reported as zero until they agree.
pub fn liquidity_value(
    reserve: TokenAmount,
    total_supply: TokenAmount,
    user_balance: TokenAmount,
) -> Result<TokenAmount, MathError> {
    if total_supply.is_zero() || user_balance > total_supply {
        return Ok(TokenAmount::zero());
    }
    mul_div(reserve.0, user_balance.0, total_supply.0).map(TokenAmount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pool_share_percent() {
        let share = pool_share_percent(TokenAmount::from(25u64), TokenAmount::from(200u64));
        assert_eq!(share, dec!(12.5));
        assert_eq!(
            pool_share_percent(TokenAmount::from(25u64), TokenAmount::zero()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_liquidity_value() {
        let value = liquidity_value(
            TokenAmount::from(1000u64),
            TokenAmount::from(200u64),
            TokenAmount::from(25u64),
        )
        .unwrap();
        assert_eq!(value, TokenAmount::from(125u64));
    }

    #[test]
    fn test_liquidity_value_stale_balance() {
        let value = liquidity_value(
            TokenAmount::from(1000u64),
            TokenAmount::from(200u64),
            TokenAmount::from(201u64),
        )
        .unwrap();
        assert!(value.is_zero());
    }
}
