//! Aggregation of on-chain staking reads into per-pool view models.
//!
//! One pass runs in three steps:
//! - [`loader`] fans out every read for every pool and records each outcome
//!   as a `ReadState`
//! - [`store`] keeps the newest snapshot per `(pool, block)` and discards
//!   commits from superseded passes
//! - [`aggregator`] turns a snapshot into view models without touching the
//!   network
//!
//! [`enrich`] and [`ordering`] are optional post-processing for display.

/// Snapshot to view-model aggregation.
pub mod aggregator;
/// Remote APR enrichment.
pub mod enrich;
/// Concurrent snapshot loading.
pub mod loader;
/// Display ordering and totals.
pub mod ordering;
/// Prelude module for convenient imports.
pub mod prelude;
/// Read-model store.
pub mod store;

pub use aggregator::{AggregatorConfig, StakingAggregator};
pub use loader::{LoaderConfig, SnapshotLoader};
pub use store::ReadModelStore;
