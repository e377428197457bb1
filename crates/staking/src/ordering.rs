use rytell_earn_domain::TokenAmount;
use rytell_earn_domain::value_objects::PoolViewModel;
use std::cmp::Reverse;

/// Orders pools for the Earn grid: higher multiplier first, then pools the
/// account has a stake in, then larger staked value in the reference asset.
///
/// The sort is stable, so pools that tie keep their aggregation order.
pub fn sort_for_display(models: &mut [PoolViewModel]) {
    models.sort_by_key(|m| {
        (
            Reverse(m.multiplier),
            !m.stake.has_stake(),
            Reverse(m.staked_value_in_reference),
        )
    });
}

/// Rewards claimable across all pools.
pub fn total_earned(models: &[PoolViewModel]) -> TokenAmount {
    models
        .iter()
        .fold(TokenAmount::zero(), |acc, m| acc + m.earned_amount)
}
