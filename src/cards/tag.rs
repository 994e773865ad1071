//! Card tags and filter panels.
//!
//! Filter ids are panel-prefixed (`"topic/ai"` belongs to panel `"topic"`).
//! A tag names its panel through `parent.id` when authored with a parent,
//! otherwise the same prefix rule used for filter ids applies.

use serde::{Deserialize, Serialize};

/// Reference to a tag's parent (its panel).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagParent {
    pub id: String,
}

/// A categorical tag attached to a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Panel-prefixed tag id, e.g. `"topic/ai"`.
    pub id: String,

    /// Explicit parent. Takes precedence over the id prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TagParent>,
}

impl Tag {
    /// Create a tag without an explicit parent.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
        }
    }

    /// Set an explicit parent (builder pattern).
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(TagParent { id: parent.into() });
        self
    }

    /// Panel this tag belongs to.
    ///
    /// `parent.id` when present, else the id up to its first `/`
    /// (the whole id when it has no `/`).
    #[must_use]
    pub fn panel(&self) -> &str {
        match &self.parent {
            Some(parent) => &parent.id,
            None => panel_of(&self.id),
        }
    }
}

impl From<&str> for Tag {
    fn from(id: &str) -> Self {
        Tag::new(id)
    }
}

/// Panel of a filter id: the substring before the first `/`.
#[must_use]
pub fn panel_of(filter_id: &str) -> &str {
    filter_id
        .split_once('/')
        .map_or(filter_id, |(panel, _)| panel)
}
