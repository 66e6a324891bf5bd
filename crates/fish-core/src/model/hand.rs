use crate::model::card::CardId;
use crate::model::half_suit::HalfSuit;
use serde::{Deserialize, Serialize};
use std::vec::Vec;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<CardId>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<CardId>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    /// Adds `card` unless it is already held. Returns whether the hand changed.
    pub fn add(&mut self, card: CardId) -> bool {
        if self.contains(card) {
            return false;
        }
        self.cards.push(card);
        self.sort();
        true
    }

    pub fn remove(&mut self, card: CardId) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Number of cards of `half_suit` currently held.
    pub fn count_in(&self, half_suit: &HalfSuit) -> usize {
        half_suit
            .cards
            .iter()
            .filter(|card| self.contains(**card))
            .count()
    }

    fn sort(&mut self) {
        self.cards.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::CardId;
    use crate::model::half_suit::{HalfSuit, HalfSuitId};

    fn card(index: u8) -> CardId {
        CardId::new(index).unwrap()
    }

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        assert!(hand.add(card(3)));
        assert!(!hand.add(card(3)));
        assert!(hand.contains(card(3)));
        assert!(hand.remove(card(3)));
        assert!(!hand.contains(card(3)));
        assert!(hand.is_empty());
    }

    #[test]
    fn cards_are_kept_sorted() {
        let hand = Hand::with_cards(vec![card(40), card(2), card(17)]);
        assert_eq!(hand.cards(), &[card(2), card(17), card(40)]);
    }

    #[test]
    fn counts_cards_of_a_half_suit() {
        let group = HalfSuit::new(
            HalfSuitId::from_index(0).unwrap(),
            "low-clubs",
            [card(0), card(1), card(2), card(3), card(4), card(5)],
        );
        let hand = Hand::with_cards(vec![card(1), card(4), card(30)]);
        assert_eq!(hand.count_in(&group), 2);
    }
}
