//! Card orderings.
//!
//! Each descending variant is the matching ascending pass reversed as a
//! whole. That differs from sorting with an inverted comparator when keys
//! tie: tied cards come out in reverse input order, not input order.
//!
//! Date comparators treat a card with a missing date as equal to anything,
//! which is not a total order. Ordering runs on a merge sort that accepts
//! such comparators without panicking and stays stable.

use std::cmp::Ordering;

use tracing::debug;

use crate::cards::Card;
use crate::core::SortOption;

/// Title order: case-insensitive first, exact text to break ties.
#[must_use]
pub fn compare_titles(a: &Card, b: &Card) -> Ordering {
    let (left, right) = (a.title(), b.title());
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Newest modified first. Missing dates compare equal.
#[must_use]
pub fn compare_modified_newest_first(a: &Card, b: &Card) -> Ordering {
    match (&a.modified_date, &b.modified_date) {
        (Some(left), Some(right)) => right.cmp(left),
        _ => Ordering::Equal,
    }
}

/// Oldest card date first. Missing dates compare equal.
#[must_use]
pub fn compare_card_date_oldest_first(a: &Card, b: &Card) -> Ordering {
    match (&a.card_date, &b.card_date) {
        (Some(left), Some(right)) => left.cmp(right),
        _ => Ordering::Equal,
    }
}

/// Title A–Z.
#[must_use]
pub fn sort_by_title_asc(cards: Vec<Card>) -> Vec<Card> {
    merge_sort_by(cards, &compare_titles)
}

/// Title Z–A: the A–Z order reversed.
#[must_use]
pub fn sort_by_title_desc(cards: Vec<Card>) -> Vec<Card> {
    reversed(sort_by_title_asc(cards))
}

/// Modified date, newest first.
#[must_use]
pub fn sort_by_modified_desc(cards: Vec<Card>) -> Vec<Card> {
    merge_sort_by(cards, &compare_modified_newest_first)
}

/// Modified date, oldest first: the newest-first order reversed.
#[must_use]
pub fn sort_by_modified_asc(cards: Vec<Card>) -> Vec<Card> {
    reversed(sort_by_modified_desc(cards))
}

/// Card date, oldest first.
#[must_use]
pub fn sort_by_date_asc(cards: Vec<Card>) -> Vec<Card> {
    merge_sort_by(cards, &compare_card_date_oldest_first)
}

/// Card date, newest first: the oldest-first order reversed.
#[must_use]
pub fn sort_by_date_desc(cards: Vec<Card>) -> Vec<Card> {
    reversed(sort_by_date_asc(cards))
}

/// Order `cards` by `option`.
///
/// `Featured` keeps source order. `Random` also passes through here; the
/// sampling engine owns that ordering.
#[must_use]
pub fn sort_cards(cards: Vec<Card>, option: SortOption) -> Vec<Card> {
    debug!(sort = %option, cards = cards.len(), "sorting cards");
    match option {
        SortOption::TitleAsc => sort_by_title_asc(cards),
        SortOption::TitleDesc => sort_by_title_desc(cards),
        SortOption::ModifiedDesc => sort_by_modified_desc(cards),
        SortOption::ModifiedAsc => sort_by_modified_asc(cards),
        SortOption::DateAsc => sort_by_date_asc(cards),
        SortOption::DateDesc => sort_by_date_desc(cards),
        SortOption::Featured | SortOption::Random => cards,
    }
}

fn reversed(mut cards: Vec<Card>) -> Vec<Card> {
    cards.reverse();
    cards
}

/// Stable top-down merge sort. Never panics on inconsistent comparators.
fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}
