//! Event timing seam.
//!
//! Classifying cards as live, upcoming, on-demand or expired is done by the
//! host. The pipeline forwards its working set to an [`EventTiming`]
//! implementation and continues with whatever comes back.

use crate::cards::Card;

/// Host-provided event classifier.
///
/// Implementations may drop or reorder cards. They should not alter card
/// identity fields.
pub trait EventTiming {
    /// Apply the event filter to `cards`.
    fn apply(&self, cards: Vec<Card>) -> Vec<Card>;
}

impl<F> EventTiming for F
where
    F: Fn(Vec<Card>) -> Vec<Card>,
{
    fn apply(&self, cards: Vec<Card>) -> Vec<Card> {
        self(cards)
    }
}

/// Classifier that passes every card through.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllEvents;

impl EventTiming for AllEvents {
    fn apply(&self, cards: Vec<Card>) -> Vec<Card> {
        cards
    }
}
