//! Collection configuration types.
//!
//! A collection is configured once by its author:
//! - `FilterMode`: How checked filters combine (AND/XOR/OR)
//! - `SortOption`: Which ordering the rendered cards use
//! - `CollectionConfig`: Combines all configuration
//!
//! Per-visit selections (checked filters, search text, bookmarks) are
//! not configuration; they travel in `CollectionQuery`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{CollectionError, Result};
use crate::cards::card::string_or_integer;
use crate::cards::CardId;

/// Collection identifier. Keys the sampling cache.
///
/// Must be unique per distinct underlying card set, otherwise a stale
/// random sample is served. Authored as a string or an integer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(#[serde(deserialize_with = "string_or_integer")] pub String);

impl CollectionId {
    /// Create a new collection ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collection({})", self.0)
    }
}

impl From<&str> for CollectionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CollectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for CollectionId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// How the active filters combine.
///
/// `And` and `Xor` share the superset rule: every selected filter must be
/// present on the card. `Xor` is not exclusive-or.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilterMode {
    /// Card must carry every selected filter.
    And,
    /// Same rule as `And`.
    Xor,
    /// Card must match any filter (per panel, when several panels are active).
    Or,
}

impl FilterMode {
    /// Wire name of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterMode::And => "and",
            FilterMode::Xor => "xor",
            FilterMode::Or => "or",
        }
    }
}

impl Default for FilterMode {
    fn default() -> Self {
        FilterMode::Or
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(FilterMode::And),
            "xor" => Ok(FilterMode::Xor),
            "or" => Ok(FilterMode::Or),
            _ => Err(CollectionError::InvalidFilterMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for FilterMode {
    type Error = CollectionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<FilterMode> for String {
    fn from(mode: FilterMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Ordering applied to the filtered cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortOption {
    /// Title A–Z.
    TitleAsc,
    /// Title Z–A (ascending pass, then reversed).
    TitleDesc,
    /// Modified date, newest first.
    ModifiedDesc,
    /// Modified date, oldest first (newest-first pass, then reversed).
    ModifiedAsc,
    /// Card date, oldest first.
    DateAsc,
    /// Card date, newest first (oldest-first pass, then reversed).
    DateDesc,
    /// Source order as authored.
    Featured,
    /// Cached random sample for the collection.
    Random,
}

impl SortOption {
    /// All options, in display order.
    pub const ALL: [SortOption; 8] = [
        SortOption::Featured,
        SortOption::TitleAsc,
        SortOption::TitleDesc,
        SortOption::DateAsc,
        SortOption::DateDesc,
        SortOption::ModifiedDesc,
        SortOption::ModifiedAsc,
        SortOption::Random,
    ];

    /// Wire name of this option.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOption::TitleAsc => "titleAsc",
            SortOption::TitleDesc => "titleDesc",
            SortOption::ModifiedDesc => "modifiedDesc",
            SortOption::ModifiedAsc => "modifiedAsc",
            SortOption::DateAsc => "dateAsc",
            SortOption::DateDesc => "dateDesc",
            SortOption::Featured => "featured",
            SortOption::Random => "random",
        }
    }
}

impl Default for SortOption {
    fn default() -> Self {
        SortOption::Featured
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CollectionError::InvalidSortOption(s.to_string()))
    }
}

impl TryFrom<String> for SortOption {
    type Error = CollectionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<SortOption> for String {
    fn from(option: SortOption) -> Self {
        option.as_str().to_string()
    }
}

/// Complete configuration for one card collection.
///
/// ## Example
///
/// ```
/// use card_collection::core::{CollectionConfig, FilterMode, SortOption};
///
/// let config = CollectionConfig::new("news")
///     .with_filter_mode(FilterMode::And)
///     .with_sort(SortOption::TitleAsc)
///     .with_search_fields(["contentArea.title"]);
///
/// assert_eq!(config.search_fields.len(), 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionConfig {
    /// Identity used for the sampling cache.
    pub collection_id: CollectionId,

    /// How checked filters combine.
    pub filter_mode: FilterMode,

    /// Ordering of the result.
    pub sort: SortOption,

    /// Dot paths into a card searched by the free-text query.
    pub search_fields: Vec<String>,

    /// Authored card ids pinned in front of fetched cards.
    pub featured_card_ids: Vec<CardId>,

    /// Cards kept by random sampling.
    pub sample_size: usize,

    /// Leading cards considered by random sampling.
    pub reservoir_size: usize,

    /// Maximum cards rendered. `None` for unlimited.
    pub total_card_limit: Option<usize>,

    /// Seed for the sampling RNG.
    pub seed: u64,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            collection_id: CollectionId::default(),
            filter_mode: FilterMode::default(),
            sort: SortOption::default(),
            search_fields: vec![
                "contentArea.title".to_string(),
                "contentArea.description".to_string(),
            ],
            featured_card_ids: Vec::new(),
            sample_size: 10,
            reservoir_size: 50,
            total_card_limit: None,
            seed: 42,
        }
    }
}

impl CollectionConfig {
    /// Create a default configuration for the given collection.
    pub fn new(collection_id: impl Into<CollectionId>) -> Self {
        Self {
            collection_id: collection_id.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the filter mode.
    #[must_use]
    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    /// Set the sort option.
    #[must_use]
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Replace the searchable field paths.
    #[must_use]
    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the featured card ids.
    #[must_use]
    pub fn with_featured<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CardId>,
    {
        self.featured_card_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set sample and reservoir sizes for random sorting.
    #[must_use]
    pub fn with_sampling(mut self, sample_size: usize, reservoir_size: usize) -> Self {
        self.sample_size = sample_size;
        self.reservoir_size = reservoir_size;
        self
    }

    /// Cap the number of rendered cards.
    #[must_use]
    pub fn with_card_limit(mut self, limit: usize) -> Self {
        self.total_card_limit = Some(limit);
        self
    }

    /// Set the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_mode_parse() {
        assert_eq!("and".parse::<FilterMode>().unwrap(), FilterMode::And);
        assert_eq!("XOR".parse::<FilterMode>().unwrap(), FilterMode::Xor);
        assert_eq!("Or".parse::<FilterMode>().unwrap(), FilterMode::Or);

        let err = "BOGUS".parse::<FilterMode>().unwrap_err();
        assert!(matches!(err, CollectionError::InvalidFilterMode(ref m) if m == "BOGUS"));
    }

    #[test]
    fn test_sort_option_parse() {
        for option in SortOption::ALL {
            assert_eq!(option.as_str().parse::<SortOption>().unwrap(), option);
        }
        assert_eq!("TITLEDESC".parse::<SortOption>().unwrap(), SortOption::TitleDesc);
        assert!(matches!(
            "sideways".parse::<SortOption>(),
            Err(CollectionError::InvalidSortOption(_))
        ));
    }

    #[test]
    fn test_collection_id_from() {
        assert_eq!(CollectionId::from(7u64), CollectionId::new("7"));
        assert_eq!(format!("{}", CollectionId::from("a")), "Collection(a)");
    }

    #[test]
    fn test_config_defaults() {
        let config = CollectionConfig::default();
        assert_eq!(config.filter_mode, FilterMode::Or);
        assert_eq!(config.sort, SortOption::Featured);
        assert_eq!(config.sample_size, 10);
        assert_eq!(config.reservoir_size, 50);
        assert!(config.total_card_limit.is_none());
    }

    #[test]
    fn test_config_from_json() {
        let config = CollectionConfig::from_json(
            r#"{
                "collectionId": "events",
                "filterMode": "and",
                "sort": "dateDesc",
                "featuredCardIds": ["a", "b"],
                "totalCardLimit": 12
            }"#,
        )
        .unwrap();

        assert_eq!(config.collection_id, CollectionId::new("events"));
        assert_eq!(config.filter_mode, FilterMode::And);
        assert_eq!(config.sort, SortOption::DateDesc);
        assert_eq!(config.featured_card_ids, vec![CardId::new("a"), CardId::new("b")]);
        assert_eq!(config.total_card_limit, Some(12));
        // untouched keys keep defaults
        assert_eq!(config.reservoir_size, 50);
    }

    #[test]
    fn test_config_numeric_ids() {
        let config =
            CollectionConfig::from_json(r#"{"collectionId": 7, "featuredCardIds": [1, "2"]}"#)
                .unwrap();

        assert_eq!(config.collection_id, CollectionId::from(7u64));
        assert_eq!(config.featured_card_ids, vec![CardId::new("1"), CardId::new("2")]);
    }

    #[test]
    fn test_config_rejects_unknown_mode() {
        let err = CollectionConfig::from_json(r#"{"filterMode": "nand"}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid filter mode: nand"));
    }

    #[test]
    fn test_config_builder() {
        let config = CollectionConfig::new("c1")
            .with_sampling(3, 8)
            .with_card_limit(5)
            .with_seed(9)
            .with_featured(["x"]);

        assert_eq!(config.sample_size, 3);
        assert_eq!(config.reservoir_size, 8);
        assert_eq!(config.total_card_limit, Some(5));
        assert_eq!(config.seed, 9);
        assert_eq!(config.featured_card_ids, vec![CardId::new("x")]);
    }

    #[test]
    fn test_config_round_trip() {
        let config = CollectionConfig::new("rt").with_sort(SortOption::Random);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"sort\":\"random\""));
        let back = CollectionConfig::from_json(&json).unwrap();
        assert_eq!(back.sort, SortOption::Random);
    }
}
