//! Card records.
//!
//! A `Card` carries identity (`id`), categorical `tags`, display data under
//! `contentArea`, and the two dates used for sorting. Any other authored
//! field is kept in `extra` so search paths can reach it.
//!
//! Engines never change `id`, `tags` or dates. Only the assembler sets
//! `is_featured` and `is_bookmarked`, and it does so on new records.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;

use super::tag::Tag;
use crate::core::Result;

/// Tags of a single card. Most cards carry a handful.
pub type TagList = SmallVec<[Tag; 4]>;

/// Unique identifier of a card.
///
/// Authored as a string or an integer; integers are kept as their decimal
/// text, so `1` and `"1"` name the same card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(#[serde(deserialize_with = "string_or_integer")] pub String);

/// Wire form of an id.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

/// Deserialize an id given as a JSON string or integer into its string form.
pub(crate) fn string_or_integer<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

impl CardId {
    /// Create a new card ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Display fields of a card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentArea {
    #[serde(default)]
    pub title: String,

    /// Description, detail text and anything else authored here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A content item in a collection.
///
/// ## Example
///
/// ```
/// use card_collection::cards::{Card, Tag};
///
/// let card = Card::new("c1")
///     .with_title("Rust at scale")
///     .with_tag(Tag::new("topic/rust"))
///     .with_card_date("2024-05-01");
///
/// assert_eq!(card.title(), "Rust at scale");
/// assert!(card.has_tag("topic/rust"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,

    /// `None` when the card was authored without a tags field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagList>,

    #[serde(default)]
    pub content_area: ContentArea,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,

    #[serde(default)]
    pub is_bookmarked: bool,

    #[serde(default)]
    pub is_featured: bool,

    /// Remaining authored fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    /// Create an empty card with the given id.
    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the title (builder pattern).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.content_area.title = title.into();
        self
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.content_area
            .extra
            .insert("description".to_string(), Value::String(description.into()));
        self
    }

    /// Add a tag (builder pattern). Creates the tag list if absent.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.get_or_insert_with(TagList::new).push(tag.into());
        self
    }

    /// Add several tags (builder pattern).
    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        let list = self.tags.get_or_insert_with(TagList::new);
        list.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the card date (builder pattern).
    #[must_use]
    pub fn with_card_date(mut self, date: impl Into<String>) -> Self {
        self.card_date = Some(date.into());
        self
    }

    /// Set the modified date (builder pattern).
    #[must_use]
    pub fn with_modified_date(mut self, date: impl Into<String>) -> Self {
        self.modified_date = Some(date.into());
        self
    }

    /// Set an extra top-level field (builder pattern).
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Card title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.content_area.title
    }

    /// Iterate over tag ids. Empty when the card has no tags.
    pub fn tag_ids(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().flatten().map(|tag| tag.id.as_str())
    }

    /// Iterate over the panels of this card's tags.
    pub fn tag_panels(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().flatten().map(Tag::panel)
    }

    /// Check whether the card carries a tag id.
    #[must_use]
    pub fn has_tag(&self, id: &str) -> bool {
        self.tag_ids().any(|tag| tag == id)
    }

    /// JSON projection of the card, used for path access.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a card from its JSON projection.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Parse a JSON array of cards.
pub fn cards_from_json(json: &str) -> Result<Vec<Card>> {
    Ok(serde_json::from_str(json)?)
}
