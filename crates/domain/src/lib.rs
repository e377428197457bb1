//! Domain model for Rytell liquidity mining.
//!
//! This crate holds the value objects and pure arithmetic behind the Earn and
//! Stake pages:
//! - Tokens and raw token amounts
//! - Fixed-point reserve ratios
//! - Staked value, reward rate and APR metrics
//! - Staking pool registry entries and per-pool read snapshots
//! - Stake/unstake input parsing

/// Pool entities.
pub mod entities;
/// Shared enums.
pub mod enums;
/// Error types.
pub mod error;
/// Fixed-point math.
pub mod math;
/// Staking metrics.
pub mod metrics;
/// Stake and unstake input parsing.
pub mod stake_input;
/// Tokens and amounts.
pub mod token;
/// Value objects.
pub mod value_objects;

pub use error::MathError;
pub use token::{Address, Token, TokenAmount};
