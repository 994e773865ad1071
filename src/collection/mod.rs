//! Collection engines: filter, search, sort, sample, assemble.
//!
//! ## Key Types
//!
//! - `FilterSelection`: Checked filter ids and their panels
//! - `SamplingCache`: Per-collection memoized random samples
//! - `CollectionEngine`: Chains every stage for one configured collection
//! - `EventTiming`: Host seam for event classification
//!
//! Each stage is also exposed as a free function so hosts can compose
//! their own pipeline.

pub mod assembler;
pub mod filter;
pub mod pipeline;
pub mod sampling;
pub mod search;
pub mod set_ops;
pub mod sort;
pub mod text;
pub mod timing;

pub use assembler::{apply_bookmark_data, apply_featured_flag, bookmarked_only, process_cards};
pub use filter::{card_matches, filter_cards, filter_cards_by_name, FilterSelection};
pub use pipeline::{CollectionEngine, CollectionQuery, CollectionView};
pub use sampling::{reservoir_sample, SamplingCache};
pub use search::{highlight_card, highlight_cards, search_cards};
pub use sort::{
    sort_by_date_asc, sort_by_date_desc, sort_by_modified_asc, sort_by_modified_desc,
    sort_by_title_asc, sort_by_title_desc, sort_cards,
};
pub use text::{highlight_search_field, sanitize_text};
pub use timing::{AllEvents, EventTiming};
