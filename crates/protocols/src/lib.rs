//! On-chain readers for Rytell staking contracts.
//!
//! This crate talks to an EVM node over JSON-RPC:
//! - `eth_call` transport with `sol!`-declared calls
//! - Typed wrappers for ERC20, StakingRewards, MiniChef, Pair, Factory and Router
//! - The [`StakingReader`] seam consumed by the snapshot loader

/// Contract wrappers.
pub mod contracts;
/// Error types.
pub mod error;
/// Prelude module for convenient imports.
pub mod prelude;
/// Reader seam and its chain-backed implementation.
pub mod reader;
/// JSON-RPC transport.
pub mod rpc;

pub use error::RpcError;
pub use reader::{ChainStakingReader, ContractAddresses, StakingReader};
pub use rpc::{RpcConfig, RpcProvider};
