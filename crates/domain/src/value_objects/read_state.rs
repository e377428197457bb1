use serde::{Deserialize, Serialize};

/// Outcome of one remote read as seen by an aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadState<T> {
    /// The read has not resolved yet. Not an error.
    Pending,
    /// The read was rejected by the remote side.
    Failed(String),
    /// The read resolved with a value.
    Ready(T),
}

impl<T> ReadState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadState<U> {
        match self {
            Self::Pending => ReadState::Pending,
            Self::Failed(reason) => ReadState::Failed(reason),
            Self::Ready(value) => ReadState::Ready(f(value)),
        }
    }
}

impl<T> Default for ReadState<T> {
    fn default() -> Self {
        Self::Pending
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for ReadState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}
