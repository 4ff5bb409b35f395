//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid deck parameters, invalid render configuration, sampling density shortfalls,
//! missing symbol artwork, image and IO failures, and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("insufficient density: {required} points required but only {available} available")]
    InsufficientDensity { required: usize, available: usize },

    #[error("symbol {symbol_id} unavailable: {reason}")]
    AssetUnavailable { symbol_id: u32, reason: String },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Builds an [`Error::AssetUnavailable`] for `symbol_id`.
    pub fn asset_unavailable(symbol_id: u32, reason: impl Into<String>) -> Self {
        Error::AssetUnavailable {
            symbol_id,
            reason: reason.into(),
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
