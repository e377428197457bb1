//! Table rendering for CLI output.

use chrono::DateTime;
use prettytable::{Table, row};
use rytell_earn_domain::TokenAmount;
use rytell_earn_domain::value_objects::PoolViewModel;

const SECONDS_PER_WEEK: u64 = 7 * 24 * 60 * 60;

/// Decimals of the reference asset, the governance token and LP tokens.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Formats a raw amount as whole tokens with four decimal places.
pub fn amount(value: TokenAmount, decimals: u8) -> String {
    value.to_fixed(decimals, 4)
}

/// Emission over one week at `rate_per_second`.
pub fn weekly(rate_per_second: TokenAmount) -> TokenAmount {
    TokenAmount(rate_per_second.0.saturating_mul(SECONDS_PER_WEEK.into()))
}

/// Period end as a UTC date, `-` when unset or not yet initialised.
pub fn period_end(timestamp: Option<u64>) -> String {
    timestamp
        .filter(|ts| *ts > 0)
        .and_then(|ts| i64::try_from(ts).ok())
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn usd(model: &PoolViewModel) -> String {
    model
        .staked_value_in_usd
        .as_ref()
        .map(|q| format!("{} {}", amount(q.amount, q.token.decimals), q.token.symbol))
        .unwrap_or_else(|| "-".to_string())
}

fn apr(model: &PoolViewModel) -> String {
    match (&model.remote_apr, model.apr) {
        (Some(remote), _) => format!(
            "{}% ({}% fees + {}% rewards)",
            remote.combined_apr.round_dp(2),
            remote.swap_fee_apr.round_dp(2),
            remote.staking_apr.round_dp(2)
        ),
        (None, Some(apr)) => format!("{apr}%"),
        (None, None) => "-".to_string(),
    }
}

/// Renders one row per pool.
pub fn pools_table(models: &[PoolViewModel]) -> Table {
    let mut table = Table::new();
    table.set_titles(row![
        "Pool",
        "Multiplier",
        "Total staked (WAVAX)",
        "Total staked (USD)",
        "Your stake",
        "Pool rate / week",
        "Your rate / week",
        "Earned",
        "Period ends",
        "APR"
    ]);

    for model in models {
        let label = if model.is_period_finished {
            format!("{} (ended)", model.label)
        } else {
            model.label.clone()
        };
        table.add_row(row![
            label,
            format!("{}x", model.multiplier),
            amount(model.staked_value_in_reference, DEFAULT_DECIMALS),
            usd(model),
            amount(model.stake.staked_amount, DEFAULT_DECIMALS),
            amount(weekly(model.total_reward_rate), DEFAULT_DECIMALS),
            amount(weekly(model.individual_reward_rate), DEFAULT_DECIMALS),
            amount(model.earned_amount, DEFAULT_DECIMALS),
            period_end(model.schedule.period_finish_timestamp),
            apr(model)
        ]);
    }
    table
}
