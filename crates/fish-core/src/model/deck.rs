use crate::model::card::CardId;
use crate::model::hand::Hand;
use crate::model::{CARD_COUNT, HAND_SIZE, PLAYER_COUNT};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::array;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<CardId>,
}

impl Deck {
    pub fn standard() -> Self {
        Self {
            cards: CardId::all().collect(),
        }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Splits the deck into six hands of nine, seat by seat.
    pub fn deal(&self) -> [Hand; PLAYER_COUNT] {
        debug_assert_eq!(self.cards.len(), CARD_COUNT);
        array::from_fn(|seat| {
            let start = seat * HAND_SIZE;
            Hand::with_cards(self.cards[start..start + HAND_SIZE].to_vec())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn deal_covers_every_card_once() {
        let hands = Deck::shuffled_with_seed(9).deal();
        let mut seen = HashSet::new();
        for hand in &hands {
            assert_eq!(hand.len(), HAND_SIZE);
            for card in hand.iter() {
                assert!(seen.insert(*card));
            }
        }
        assert_eq!(seen.len(), CARD_COUNT);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
        assert_ne!(deck_a.cards(), Deck::standard().cards());
    }
}
