pub mod staking_pool;

pub use staking_pool::{PoolCapabilities, PoolKind, StakingPool};
