//! Error types for board operations
//!
//! Declined transitions are not errors; see [`bucketeer_domain::Rejection`].

use bucketeer_domain::ItemId;
use thiserror::Error;

/// Errors that can occur while setting up or configuring a board
#[derive(Error, Debug)]
pub enum BoardError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The same item id appears twice in the seed list
    #[error("Duplicate item in seed: {0}")]
    DuplicateItem(ItemId),

    /// Seed data could not be loaded
    #[error("Seed error: {0}")]
    Seed(String),

    /// No tokio runtime to run reversion timers on
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Failed to read a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failed to parse JSON
    #[error("Failed to parse seed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
