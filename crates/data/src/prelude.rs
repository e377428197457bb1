//! Prelude module for convenient imports.

pub use crate::api::{ApiConfig, ExchangeApi, ExchangeApiClient};
pub use crate::error::{ApiError, RegistryError};
pub use crate::registry::PoolRegistry;

#[cfg(any(test, feature = "mocks"))]
pub use crate::api::MockExchangeApi;
