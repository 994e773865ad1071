//! Card data model: records, tags, and path access.
//!
//! ## Key Types
//!
//! - `CardId`: Unique card identity
//! - `Card`: A content item with tags, dates and display fields
//! - `Tag`: Categorical tag; its panel groups related filters
//!
//! Cards are plain values. Engines consume and return them; nothing holds
//! a reference past a single call except the sampling cache.

pub mod card;
pub mod path;
pub mod tag;

pub use card::{cards_from_json, Card, CardId, ContentArea, TagList};
pub use path::{get_by_path, lookup, set_by_path, text_at};
pub use tag::{panel_of, Tag, TagParent};
