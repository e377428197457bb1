//! Validation of amounts typed into the stake and unstake forms.

use crate::token::TokenAmount;
use alloy_primitives::utils as alloy_units;
use thiserror::Error;

/// Reason a typed amount cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StakeInputError {
    #[error("connect a wallet")]
    ConnectWallet,
    #[error("enter an amount")]
    EnterAmount,
}

/// Parses a decimal string such as `"1.25"` into raw units of a token with
/// `decimals` fractional digits.
///
/// Empty, zero, malformed, or over-precise input yields `None`.
pub fn parse_units(typed: &str, decimals: u8) -> Option<TokenAmount> {
    let typed = typed.trim();
    if typed.is_empty() {
        return None;
    }
    let (int_part, frac_part) = match typed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (typed, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
        || frac_part.len() > decimals as usize
    {
        return None;
    }

    let normalized = match (int_part.is_empty(), frac_part.is_empty()) {
        (true, _) => format!("0.{frac_part}"),
        (false, true) => int_part.to_string(),
        (false, false) => format!("{int_part}.{frac_part}"),
    };
    let raw = alloy_units::parse_units(&normalized, decimals)
        .ok()?
        .get_absolute();
    if raw.is_zero() {
        return None;
    }
    Some(TokenAmount::from(raw))
}

/// Validates a stake (or unstake) amount against what the account holds.
///
/// `available` is the unstaked balance when staking and the staked balance
/// when unstaking. A missing wallet takes precedence over a bad amount.
pub fn parse_stake_amount(
    typed: &str,
    decimals: u8,
    available: Option<TokenAmount>,
    account_connected: bool,
) -> Result<TokenAmount, StakeInputError> {
    let parsed = parse_units(typed, decimals)
        .zip(available)
        .filter(|(amount, available)| amount <= available)
        .map(|(amount, _)| amount);

    if !account_connected {
        return Err(StakeInputError::ConnectWallet);
    }
    parsed.ok_or(StakeInputError::EnterAmount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1.5", 6), Some(TokenAmount::from(1_500_000u64)));
        assert_eq!(parse_units(".5", 2), Some(TokenAmount::from(50u64)));
        assert_eq!(parse_units("3.", 2), Some(TokenAmount::from(300u64)));
        assert_eq!(parse_units("42", 0), Some(TokenAmount::from(42u64)));
    }

    #[test]
    fn test_parse_units_rejects() {
        assert_eq!(parse_units("", 18), None);
        assert_eq!(parse_units(".", 18), None);
        assert_eq!(parse_units("0.000", 18), None);
        assert_eq!(parse_units("1.234", 2), None);
        assert_eq!(parse_units("-1", 18), None);
        assert_eq!(parse_units("1e5", 18), None);
        assert_eq!(parse_units("1.2.3", 18), None);
    }

    #[test]
    fn test_parse_stake_amount() {
        let available = Some(TokenAmount::from(2_000_000u64));

        assert_eq!(
            parse_stake_amount("1.5", 6, available, true),
            Ok(TokenAmount::from(1_500_000u64))
        );
        assert_eq!(
            parse_stake_amount("2", 6, available, true),
            Ok(TokenAmount::from(2_000_000u64))
        );
        assert_eq!(
            parse_stake_amount("2.000001", 6, available, true),
            Err(StakeInputError::EnterAmount)
        );
        assert_eq!(
            parse_stake_amount("1", 6, None, true),
            Err(StakeInputError::EnterAmount)
        );
    }

    #[test]
    fn test_wallet_error_takes_precedence() {
        assert_eq!(
            parse_stake_amount("abc", 6, None, false),
            Err(StakeInputError::ConnectWallet)
        );
        assert_eq!(
            parse_stake_amount("1", 6, Some(TokenAmount::from(10_000_000u64)), false),
            Err(StakeInputError::ConnectWallet)
        );
    }
}
