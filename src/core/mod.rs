//! Core types: configuration, errors, RNG.
//!
//! These are shared by every engine and carry no card logic of their own.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{CollectionConfig, CollectionId, FilterMode, SortOption};
pub use error::{CollectionError, Result};
pub use rng::CollectionRng;
