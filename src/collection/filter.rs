//! Tag filter evaluation.
//!
//! ## Modes
//!
//! - **AND / XOR**: the card's tag ids must contain every selected filter id.
//! - **OR, one panel**: the card must carry any selected filter id.
//! - **OR, several panels**: the card must have a tag in every active panel,
//!   and in each panel it must carry one of that panel's selected filters.
//!
//! Filtering preserves input order and never touches card data.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::set_ops::{intersects, is_superset};
use crate::cards::{panel_of, Card};
use crate::core::{FilterMode, Result};

/// Checked filter ids and the panels they belong to.
///
/// ## Example
///
/// ```
/// use card_collection::collection::FilterSelection;
///
/// let selection = FilterSelection::from_ids(["topic/ai", "topic/ml", "region/emea"]);
/// assert_eq!(selection.ids().len(), 3);
/// assert_eq!(selection.panels().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
    ids: FxHashSet<String>,
    panels: FxHashSet<String>,
}

impl FilterSelection {
    /// Empty selection (filtering is a no-op).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection, deriving each id's panel from its prefix.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: FxHashSet<String> = ids.into_iter().map(Into::into).collect();
        let panels = ids.iter().map(|id| panel_of(id).to_string()).collect();
        Self { ids, panels }
    }

    /// Build a selection with an explicitly supplied panel set.
    pub fn with_panels<I, S, P, Q>(ids: I, panels: P) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        P: IntoIterator<Item = Q>,
        Q: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            panels: panels.into_iter().map(Into::into).collect(),
        }
    }

    /// Check a filter.
    pub fn insert(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.panels.insert(panel_of(&id).to_string());
        self.ids.insert(id);
    }

    /// Uncheck a filter. Its panel goes away with its last filter.
    pub fn remove(&mut self, id: &str) {
        if self.ids.remove(id) {
            let panel = panel_of(id);
            if !self.ids.iter().any(|other| panel_of(other) == panel) {
                self.panels.remove(panel);
            }
        }
    }

    /// Active filter ids.
    #[must_use]
    pub fn ids(&self) -> &FxHashSet<String> {
        &self.ids
    }

    /// Active panels.
    #[must_use]
    pub fn panels(&self) -> &FxHashSet<String> {
        &self.panels
    }

    /// True when no filter is checked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Selected filter ids grouped per active panel.
///
/// A filter joins every panel whose name it starts with.
struct PanelGroups<'a> {
    groups: Vec<Vec<&'a str>>,
}

impl<'a> PanelGroups<'a> {
    fn new(selection: &'a FilterSelection) -> Self {
        let groups = selection
            .panels
            .iter()
            .map(|panel| {
                selection
                    .ids
                    .iter()
                    .filter(|id| id.starts_with(panel.as_str()))
                    .map(String::as_str)
                    .collect()
            })
            .collect();
        Self { groups }
    }
}

/// Keep the cards matching `selection` under `mode`.
///
/// An empty selection returns `cards` unchanged. Cards without a tags
/// field never match a non-empty selection.
pub fn filter_cards(cards: Vec<Card>, selection: &FilterSelection, mode: FilterMode) -> Vec<Card> {
    if selection.is_empty() {
        return cards;
    }

    let before = cards.len();
    let groups = match mode {
        FilterMode::Or if selection.panels.len() >= 2 => Some(PanelGroups::new(selection)),
        _ => None,
    };

    let matching: Vec<Card> = cards
        .into_iter()
        .filter(|card| matches(card, selection, mode, groups.as_ref()))
        .collect();

    debug!(
        mode = %mode,
        filters = selection.ids.len(),
        panels = selection.panels.len(),
        before,
        after = matching.len(),
        "filtered cards"
    );
    matching
}

/// Like [`filter_cards`], with the mode given by name.
///
/// Fails with `InvalidFilterMode` for an unknown name, even when the
/// selection is empty.
pub fn filter_cards_by_name(
    cards: Vec<Card>,
    selection: &FilterSelection,
    mode: &str,
) -> Result<Vec<Card>> {
    let mode: FilterMode = mode.parse()?;
    Ok(filter_cards(cards, selection, mode))
}

/// Check a single card against `selection` under `mode`.
#[must_use]
pub fn card_matches(card: &Card, selection: &FilterSelection, mode: FilterMode) -> bool {
    if selection.is_empty() {
        return true;
    }
    let groups = match mode {
        FilterMode::Or if selection.panels.len() >= 2 => Some(PanelGroups::new(selection)),
        _ => None,
    };
    matches(card, selection, mode, groups.as_ref())
}

fn matches(
    card: &Card,
    selection: &FilterSelection,
    mode: FilterMode,
    groups: Option<&PanelGroups<'_>>,
) -> bool {
    if card.tags.is_none() {
        return false;
    }
    let tag_ids: FxHashSet<&str> = card.tag_ids().collect();
    let active = selection.ids.iter().map(String::as_str);

    match (mode, groups) {
        (FilterMode::And | FilterMode::Xor, _) => is_superset(&tag_ids, active),
        (FilterMode::Or, None) => intersects(&tag_ids, active),
        (FilterMode::Or, Some(groups)) => {
            let card_panels: FxHashSet<&str> = card.tag_panels().collect();
            is_superset(&card_panels, selection.panels.iter().map(String::as_str))
                && groups
                    .groups
                    .iter()
                    .all(|filters| intersects(&tag_ids, filters.iter().copied()))
        }
    }
}
