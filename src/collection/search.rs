//! Free-text search over configured card fields.
//!
//! Each search field is a dot path into the card (see [`crate::cards::path`]).
//! A card matches a field when the sanitized field text contains the
//! sanitized query. Results are gathered field by field, then
//! deduplicated by card id, so a card appears once at its first hit.

use serde_json::Value;
use tracing::{debug, trace};

use super::set_ops::{dedup_by_key, flatten};
use super::text::{highlight_search_field, sanitize_text};
use crate::cards::{lookup, set_by_path, text_at, Card};
use crate::core::Result;

/// Keep the cards whose search fields contain `query`.
///
/// A query that is empty after sanitizing returns `cards` unchanged.
pub fn search_cards<S: AsRef<str>>(query: &str, cards: Vec<Card>, search_fields: &[S]) -> Vec<Card> {
    let needle = sanitize_text(query);
    if needle.is_empty() {
        return cards;
    }

    let projections: Vec<Value> = cards
        .iter()
        .map(|card| {
            card.to_value().unwrap_or_else(|err| {
                debug!(card = %card.id, error = %err, "card not searchable");
                Value::Null
            })
        })
        .collect();

    let per_field = search_fields.iter().map(|field| {
        let field = field.as_ref();
        let hits: Vec<usize> = projections
            .iter()
            .enumerate()
            .filter(|(_, value)| sanitize_text(&text_at(value, field)).contains(&needle))
            .map(|(index, _)| index)
            .collect();
        trace!(field, hits = hits.len(), "search field scanned");
        hits
    });

    let order = dedup_by_key(flatten(per_field), |&index| cards[index].id.clone());

    let mut slots: Vec<Option<Card>> = cards.into_iter().map(Some).collect();
    let matching: Vec<Card> = order
        .into_iter()
        .filter_map(|index| slots.get_mut(index).and_then(Option::take))
        .collect();

    debug!(query = %needle, matches = matching.len(), "searched cards");
    matching
}

/// Copy of `card` with `query` highlighted in the field at `search_field`.
///
/// Returns an unchanged copy when the field is absent, not a string, or
/// empty. Matching is unaffected; this only decorates display text.
pub fn highlight_card(card: &Card, search_field: &str, query: &str) -> Result<Card> {
    let value = card.to_value()?;
    let highlighted = match lookup(&value, search_field) {
        Some(Value::String(text)) if !text.is_empty() => {
            Value::String(highlight_search_field(text, query))
        }
        _ => return Ok(card.clone()),
    };
    Card::from_value(set_by_path(&value, search_field, highlighted))
}

/// Highlight `query` across every search field of every card.
pub fn highlight_cards<S: AsRef<str>>(
    cards: &[Card],
    search_fields: &[S],
    query: &str,
) -> Result<Vec<Card>> {
    cards
        .iter()
        .map(|card| {
            search_fields.iter().try_fold(card.clone(), |current, field| {
                highlight_card(&current, field.as_ref(), query)
            })
        })
        .collect()
}
