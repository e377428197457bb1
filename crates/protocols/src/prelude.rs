//! Prelude module for convenient imports.
//!
//! ```rust
//! use rytell_earn_protocols::prelude::*;
//! ```

pub use crate::contracts::{
    Erc20Contract, FactoryContract, MiniChefContract, PairContract, RouterContract,
    StakingRewardsContract,
};
pub use crate::error::RpcError;
pub use crate::reader::{ChainStakingReader, ContractAddresses, StakingReader};
pub use crate::rpc::{RpcConfig, RpcProvider};

#[cfg(any(test, feature = "mocks"))]
pub use crate::reader::MockStakingReader;
