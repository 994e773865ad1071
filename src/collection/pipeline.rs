//! The collection pipeline.
//!
//! ```text
//! raw cards ─► assemble ─► bookmarks-only ─► event timing ─► filter ─► search ─► sort | sample ─► limit
//! ```
//!
//! `CollectionEngine` owns the configuration and the sampling cache, so a
//! random ordering stays fixed for as long as the engine lives (or until
//! [`CollectionEngine::reset_sampling`]).

use rustc_hash::FxHashSet;
use tracing::debug;

use super::assembler::{apply_bookmark_data, apply_featured_flag, bookmarked_only, process_cards};
use super::filter::{filter_cards, FilterSelection};
use super::sampling::SamplingCache;
use super::search::search_cards;
use super::sort::sort_cards;
use super::timing::{AllEvents, EventTiming};
use crate::cards::{Card, CardId};
use crate::core::{CollectionConfig, SortOption};

/// Per-visit user state: checked filters, search text, bookmarks.
#[derive(Clone, Debug, Default)]
pub struct CollectionQuery {
    pub selection: FilterSelection,
    pub search: String,
    pub bookmarked_ids: FxHashSet<CardId>,
    pub bookmarks_only: bool,
}

impl CollectionQuery {
    /// Empty query: everything passes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the checked filters.
    #[must_use]
    pub fn with_selection(mut self, selection: FilterSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Set the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the bookmarked card ids.
    #[must_use]
    pub fn with_bookmarks<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CardId>,
    {
        self.bookmarked_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Show only bookmarked cards.
    #[must_use]
    pub fn bookmarks_only(mut self) -> Self {
        self.bookmarks_only = true;
        self
    }
}

/// Result of one pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionView {
    /// Cards to render, in order.
    pub cards: Vec<Card>,
    /// Cards that matched before the card limit was applied.
    pub total_matching: usize,
}

/// Runs the full pipeline for one configured collection.
///
/// ## Example
///
/// ```
/// use card_collection::cards::Card;
/// use card_collection::collection::{CollectionEngine, CollectionQuery, FilterSelection};
/// use card_collection::core::{CollectionConfig, FilterMode, SortOption};
///
/// let config = CollectionConfig::new("demo")
///     .with_filter_mode(FilterMode::And)
///     .with_sort(SortOption::TitleAsc);
/// let mut engine = CollectionEngine::new(config);
///
/// let cards = vec![
///     Card::new("1").with_title("Beta").with_tag("topic/rust"),
///     Card::new("2").with_title("Alpha").with_tag("topic/rust"),
///     Card::new("3").with_title("Gamma").with_tag("topic/go"),
/// ];
/// let query = CollectionQuery::new().with_selection(FilterSelection::from_ids(["topic/rust"]));
///
/// let view = engine.render(cards, &query);
/// let ids: Vec<_> = view.cards.iter().map(|c| c.id.as_str()).collect();
/// assert_eq!(ids, vec!["2", "1"]);
/// ```
pub struct CollectionEngine {
    config: CollectionConfig,
    cache: SamplingCache,
    event_timing: Box<dyn EventTiming>,
}

impl CollectionEngine {
    /// Create an engine with a fresh sampling cache seeded from `config`.
    #[must_use]
    pub fn new(config: CollectionConfig) -> Self {
        let cache = SamplingCache::new(config.seed);
        Self {
            config,
            cache,
            event_timing: Box::new(AllEvents),
        }
    }

    /// Install a host event classifier (builder pattern).
    #[must_use]
    pub fn with_event_timing(mut self, timing: impl EventTiming + 'static) -> Self {
        self.event_timing = Box::new(timing);
        self
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Sampling cache backing random ordering.
    #[must_use]
    pub fn sampling_cache(&self) -> &SamplingCache {
        &self.cache
    }

    /// Forget every cached random sample.
    pub fn reset_sampling(&mut self) {
        self.cache.clear();
    }

    /// Build the working set: featured cards first, deduplicated, with
    /// bookmark flags applied.
    #[must_use]
    pub fn assemble(&self, raw_cards: Vec<Card>, bookmarked_ids: &FxHashSet<CardId>) -> Vec<Card> {
        let featured = apply_featured_flag(&self.config.featured_card_ids, &raw_cards);
        let merged = process_cards(featured, raw_cards);
        apply_bookmark_data(&merged, bookmarked_ids)
    }

    /// Run the full pipeline over `raw_cards`.
    pub fn render(&mut self, raw_cards: Vec<Card>, query: &CollectionQuery) -> CollectionView {
        let received = raw_cards.len();
        let mut cards = self.assemble(raw_cards, &query.bookmarked_ids);
        if query.bookmarks_only {
            cards = bookmarked_only(cards);
        }
        let cards = self.event_timing.apply(cards);
        let cards = filter_cards(cards, &query.selection, self.config.filter_mode);
        let cards = search_cards(&query.search, cards, &self.config.search_fields);

        let mut cards: Vec<Card> = match self.config.sort {
            SortOption::Random => self
                .cache
                .random_sort(
                    &cards,
                    self.config.collection_id.clone(),
                    self.config.sample_size,
                    self.config.reservoir_size,
                )
                .into_iter()
                .collect(),
            option => sort_cards(cards, option),
        };

        let total_matching = cards.len();
        if let Some(limit) = self.config.total_card_limit {
            cards.truncate(limit);
        }

        debug!(
            collection = %self.config.collection_id,
            received,
            total_matching,
            rendered = cards.len(),
            "rendered collection"
        );
        CollectionView {
            cards,
            total_matching,
        }
    }
}

impl std::fmt::Debug for CollectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionEngine")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FilterMode;

    fn ids(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    fn deck() -> Vec<Card> {
        vec![
            Card::new("1").with_title("Delta").with_tags(["topic/rust", "type/video"]),
            Card::new("2").with_title("Alpha").with_tags(["topic/go", "type/blog"]),
            Card::new("3").with_title("Charlie").with_tags(["topic/rust", "type/blog"]),
            Card::new("4").with_title("Bravo rust").with_tags(["topic/python"]),
        ]
    }

    #[test]
    fn test_empty_query_keeps_source_order() {
        let mut engine = CollectionEngine::new(CollectionConfig::new("c"));
        let view = engine.render(deck(), &CollectionQuery::new());
        assert_eq!(ids(&view.cards), vec!["1", "2", "3", "4"]);
        assert_eq!(view.total_matching, 4);
    }

    #[test]
    fn test_featured_cards_lead() {
        let config = CollectionConfig::new("c").with_featured(["3"]);
        let mut engine = CollectionEngine::new(config);
        let view = engine.render(deck(), &CollectionQuery::new());

        assert_eq!(ids(&view.cards), vec!["3", "1", "2", "4"]);
        assert!(view.cards[0].is_featured);
        assert!(!view.cards[1].is_featured);
    }

    #[test]
    fn test_filter_then_search_then_sort() {
        let config = CollectionConfig::new("c")
            .with_filter_mode(FilterMode::Or)
            .with_sort(SortOption::TitleAsc);
        let mut engine = CollectionEngine::new(config);

        let query = CollectionQuery::new()
            .with_selection(FilterSelection::from_ids(["topic/rust", "topic/python"]));
        let view = engine.render(deck(), &query);
        assert_eq!(ids(&view.cards), vec!["4", "3", "1"]);

        let query = query.with_search("rust");
        let view = engine.render(deck(), &query);
        assert_eq!(ids(&view.cards), vec!["4"]);
    }

    #[test]
    fn test_bookmarks_only() {
        let mut engine = CollectionEngine::new(CollectionConfig::new("c"));
        let query = CollectionQuery::new().with_bookmarks(["2", "4"]).bookmarks_only();
        let view = engine.render(deck(), &query);

        assert_eq!(ids(&view.cards), vec!["2", "4"]);
        assert!(view.cards.iter().all(|c| c.is_bookmarked));
    }

    #[test]
    fn test_card_limit_reports_total() {
        let config = CollectionConfig::new("c").with_card_limit(2);
        let mut engine = CollectionEngine::new(config);
        let view = engine.render(deck(), &CollectionQuery::new());

        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.total_matching, 4);
    }

    #[test]
    fn test_event_timing_forwarded() {
        let mut engine = CollectionEngine::new(CollectionConfig::new("c"))
            .with_event_timing(|cards: Vec<Card>| -> Vec<Card> { cards.into_iter().take(1).collect() });
        let view = engine.render(deck(), &CollectionQuery::new());
        assert_eq!(ids(&view.cards), vec!["1"]);
    }

    #[test]
    fn test_random_sort_is_stable_until_reset() {
        let config = CollectionConfig::new("rand")
            .with_sort(SortOption::Random)
            .with_sampling(3, 4);
        let mut engine = CollectionEngine::new(config);

        let first = engine.render(deck(), &CollectionQuery::new());
        assert_eq!(first.cards.len(), 3);

        // a narrower query still gets the cached sample
        let query = CollectionQuery::new().with_search("alpha");
        let second = engine.render(deck(), &query);
        assert_eq!(first, second);

        engine.reset_sampling();
        assert!(engine.sampling_cache().is_empty());
        let third = engine.render(deck(), &query);
        assert_eq!(ids(&third.cards), vec!["2"]);
    }
}
