//! Error types for the collection engines.
//!
//! Only configuration mistakes fail. Missing tags, dates or search paths
//! are not errors; they degrade to "no match" or "equal".

use thiserror::Error;

/// Errors that can occur while configuring or running a collection.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The filter mode name is not one of `and`, `xor`, `or`.
    #[error("Invalid filter mode: {0}")]
    InvalidFilterMode(String),

    /// The sort option name is not recognized.
    #[error("Invalid sort option: {0}")]
    InvalidSortOption(String),

    /// A card or config could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollectionError>;
