use thiserror::Error;

/// Errors returned by the exchange API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unparseable response: {0}")]
    Parse(String),
}

/// Errors raised while loading the pool registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read registry: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid registry JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate pool id: {0}")]
    DuplicatePool(String),

    #[error("Invalid registry: {0}")]
    Invalid(String),
}
