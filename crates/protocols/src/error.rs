use thiserror::Error;

/// Errors raised while reading contract state.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("node returned error {code}: {message}")]
    Node { code: i64, message: String },
    #[error("malformed response: {0}")]
    InvalidResponse(String),
    #[error("cannot decode return data of {0}")]
    AbiDecoding(String),
    #[error("value out of range: {0}")]
    OutOfRange(&'static str),
}
