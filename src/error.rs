//! Error types for the ypbank-wallet library.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the (total) amount pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading a JSON configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing CSV output.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Unknown currency code.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// Exchange rate that is not a positive finite number.
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A (simulated) data source call failed.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Profile update requested before any profile was fetched.
    #[error("No profile loaded to update")]
    NoProfileLoaded,
}
