use crate::error::MathError;
use crate::math::fixed_point::mul_div;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 365-day year; leap years are not accounted for.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Annualises a per-second reward rate against the total staked, both in
/// the same denomination. Result is a whole percentage.
///
/// formula: floor(rate * 31_536_000 * 100 / total_supply)
pub fn annual_percentage_rate(
    reward_rate_per_second: U256,
    total_supply: U256,
) -> Result<U256, MathError> {
    if total_supply.is_zero() {
        return Ok(U256::zero());
    }
    mul_div(
        reward_rate_per_second,
        U256::from(SECONDS_PER_YEAR * 100),
        total_supply,
    )
}

/// Projection for the share-based staking bar (RADI in, xRADI out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeProjection {
    /// Governance tokens held by the bar, in whole tokens.
    pub total_staked: Decimal,
    /// Share tokens minted by the bar, in whole tokens.
    pub total_shares: Decimal,
    /// Governance tokens expected to flow into the bar over a year.
    pub annual_projection: Decimal,
}

impl ExchangeProjection {
    pub fn new(total_staked: Decimal, total_shares: Decimal, annual_projection: Decimal) -> Self {
        Self {
            total_staked,
            total_shares,
            annual_projection,
        }
    }

    /// Governance tokens redeemable for one share token today.
    pub fn share_price(&self) -> Decimal {
        if self.total_shares.is_zero() {
            return Decimal::ZERO;
        }
        self.total_staked / self.total_shares
    }

    /// Share price one year out, given the projected inflow.
    pub fn projected_share_price(&self) -> Decimal {
        if self.total_shares.is_zero() {
            return Decimal::ZERO;
        }
        (self.total_staked + self.annual_projection) / self.total_shares
    }

    /// Projected share-price growth over a year, in percent, 4 decimal places.
    ///
    /// This is relative growth, `(projected - price) / price`. The legacy
    /// Stake page computed `projected - price / price` instead, which for a
    /// 1.2 price and 1.32 projection reads 32.00 rather than 10.
    pub fn projected_apr(&self) -> Decimal {
        let price = self.share_price();
        if price.is_zero() {
            return Decimal::ZERO;
        }
        ((self.projected_share_price() - price) / price * Decimal::ONE_HUNDRED).round_dp(4)
    }
}
