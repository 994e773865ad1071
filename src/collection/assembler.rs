//! Working-set assembly: featured cards, dedup, bookmark flags.
//!
//! All functions return new records. Inputs are never mutated.

use rustc_hash::FxHashSet;
use tracing::trace;

use super::set_ops::dedup_by_key;
use crate::cards::{Card, CardId};

/// Featured cards first, then fetched cards, deduplicated by id.
///
/// A card present in both keeps its featured copy and front position.
#[must_use]
pub fn process_cards(featured_cards: Vec<Card>, raw_cards: Vec<Card>) -> Vec<Card> {
    let featured = featured_cards.len();
    let raw = raw_cards.len();
    let merged = dedup_by_key(featured_cards.into_iter().chain(raw_cards), |card| card.id.clone());
    trace!(featured, raw, merged = merged.len(), "assembled cards");
    merged
}

/// Copy of `cards` with `is_bookmarked` set from `bookmarked_ids`.
#[must_use]
pub fn apply_bookmark_data(cards: &[Card], bookmarked_ids: &FxHashSet<CardId>) -> Vec<Card> {
    cards
        .iter()
        .map(|card| Card {
            is_bookmarked: bookmarked_ids.contains(&card.id),
            ..card.clone()
        })
        .collect()
}

/// Featured copies of the cards named by `ids`, in `ids` order.
///
/// Every card sharing an id is included, each flagged `is_featured`.
/// Ids with no card are skipped.
#[must_use]
pub fn apply_featured_flag(ids: &[CardId], cards: &[Card]) -> Vec<Card> {
    ids.iter()
        .flat_map(|id| cards.iter().filter(move |card| card.id == *id))
        .map(|card| Card {
            is_featured: true,
            ..card.clone()
        })
        .collect()
}

/// Only the bookmarked cards, in order.
#[must_use]
pub fn bookmarked_only(cards: Vec<Card>) -> Vec<Card> {
    cards.into_iter().filter(|card| card.is_bookmarked).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_process_cards_featured_wins() {
        let mut featured = Card::new("1");
        featured.is_featured = true;

        let result = process_cards(vec![featured.clone()], vec![Card::new("1"), Card::new("2")]);

        assert_eq!(result, vec![featured, Card::new("2")]);
    }

    #[test]
    fn test_process_cards_dedups_raw() {
        let result = process_cards(
            vec![],
            vec![Card::new("a"), Card::new("b"), Card::new("a").with_title("dup")],
        );
        assert_eq!(ids(&result), vec!["a", "b"]);
        assert_eq!(result[0].title(), "");
    }

    #[test]
    fn test_apply_bookmark_data() {
        let cards = vec![Card::new("a"), Card::new("b")];
        let bookmarks: FxHashSet<CardId> = [CardId::new("b")].into_iter().collect();

        let result = apply_bookmark_data(&cards, &bookmarks);

        assert!(!result[0].is_bookmarked);
        assert!(result[1].is_bookmarked);
        assert!(!cards[1].is_bookmarked, "input untouched");
    }

    #[test]
    fn test_apply_bookmark_data_clears_stale_flags() {
        let mut stale = Card::new("a");
        stale.is_bookmarked = true;
        let result = apply_bookmark_data(&[stale], &FxHashSet::default());
        assert!(!result[0].is_bookmarked);
    }

    #[test]
    fn test_apply_featured_flag_order_and_copies() {
        let cards = vec![
            Card::new("a"),
            Card::new("b").with_title("first b"),
            Card::new("c"),
            Card::new("b").with_title("second b"),
        ];
        let wanted = [CardId::new("c"), CardId::new("missing"), CardId::new("b")];

        let result = apply_featured_flag(&wanted, &cards);

        assert_eq!(ids(&result), vec!["c", "b", "b"]);
        assert!(result.iter().all(|c| c.is_featured));
        assert_eq!(result[1].title(), "first b");
        assert!(cards.iter().all(|c| !c.is_featured), "input untouched");
    }

    #[test]
    fn test_bookmarked_only() {
        let mut kept = Card::new("k");
        kept.is_bookmarked = true;
        let result = bookmarked_only(vec![Card::new("x"), kept]);
        assert_eq!(ids(&result), vec!["k"]);
    }
}
