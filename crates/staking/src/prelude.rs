//! Prelude module for convenient imports.
//!
//! ```rust
//! use rytell_earn_staking::prelude::*;
//! ```

pub use crate::aggregator::{AggregatorConfig, StakingAggregator, reference_price_from_market};
pub use crate::enrich::enrich_with_remote_apr;
pub use crate::loader::{LoaderConfig, SnapshotLoader};
pub use crate::ordering::{sort_for_display, total_earned};
pub use crate::store::{PassHandle, ReadModelStore};
