//! Error types used by the crate.

use thiserror::Error;

/// Cartometer error type.
#[derive(Debug, Error)]
pub enum CartometerError {
    /// I/O error (network or file)
    #[error("failed to load data")]
    IO,
    /// Error decoding data.
    #[error("failed to decode data")]
    Decoding(#[from] serde_json::Error),
    /// Item not found.
    #[error("item not found")]
    NotFound,
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for CartometerError {
    fn from(_value: reqwest::Error) -> Self {
        Self::IO
    }
}
