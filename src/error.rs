//! # Error Types
//!
//! Custom error types for iGate Display using `thiserror`.

use thiserror::Error;

/// Main error type for iGate Display
#[derive(Debug, Error)]
pub enum IgateDisplayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Serial transport errors
    #[error("Serial error: {0}")]
    Serial(String),

    /// None of the candidate display ports could be opened
    #[error("No display serial port could be opened (tried: {0})")]
    SerialPortNotFound(String),

    /// Local station identity missing from the Direwolf configuration
    #[error("MYCALL not found in {0}")]
    MycallNotFound(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for iGate Display
pub type Result<T> = std::result::Result<T, IgateDisplayError>;
