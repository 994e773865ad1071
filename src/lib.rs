//! # card-collection
//!
//! Filtering, search, sorting and sampling for paginated card collections.
//!
//! ## Design Principles
//!
//! 1. **Pure stages**: Filter, search and sort take cards and return cards.
//!    They never change card identity, tags or dates.
//!
//! 2. **Explicit state**: The only state is the sampling cache, an owned
//!    value with a caller-controlled lifetime.
//!
//! 3. **Configuration Over Convention**: Authors pick filter mode, sort,
//!    search fields and sampling sizes via `CollectionConfig`.
//!
//! ## Modules
//!
//! - `core`: Configuration, collection ids, errors, RNG
//! - `cards`: Card records, tags and panels, dot-path access
//! - `collection`: Filter, search, sort, sampling, assembly, pipeline

pub mod cards;
pub mod collection;
pub mod core;

// Re-export commonly used types
pub use crate::core::{
    CollectionConfig, CollectionError, CollectionId, CollectionRng, FilterMode, Result,
    SortOption,
};

pub use crate::cards::{cards_from_json, Card, CardId, ContentArea, Tag, TagParent};

pub use crate::collection::{
    filter_cards, process_cards, search_cards, sort_cards, CollectionEngine, CollectionQuery,
    CollectionView, EventTiming, FilterSelection, SamplingCache,
};
