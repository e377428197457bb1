//! External data sources for Rytell Earn.
//!
//! - [`api`]: the exchange's HTTP API (remote APR, circulating supply, volume projection)
//! - [`registry`]: the JSON pool registry

/// Exchange HTTP API client.
pub mod api;
/// Error types.
pub mod error;
/// Prelude module for convenient imports.
pub mod prelude;
/// Pool registry loading.
pub mod registry;

pub use api::{ApiConfig, ExchangeApi, ExchangeApiClient};
pub use error::{ApiError, RegistryError};
pub use registry::PoolRegistry;
