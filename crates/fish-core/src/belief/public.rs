use crate::model::CARD_COUNT;
use crate::model::PLAYER_COUNT;
use crate::model::card::CardId;

/// Flat prior for every card before the agent has revealed anything.
pub const PUBLIC_PRIOR: f32 = 1.0 / PLAYER_COUNT as f32;

/// What the whole table could infer about the agent holding each card.
/// Only the agent's own calls move these values.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicPerception {
    values: [f32; CARD_COUNT],
}

impl PublicPerception {
    pub fn new() -> Self {
        Self {
            values: [PUBLIC_PRIOR; CARD_COUNT],
        }
    }

    pub fn get(&self, card: CardId) -> f32 {
        self.values[card.index()]
    }

    pub fn set(&mut self, card: CardId, value: f32) {
        self.values[card.index()] = value.clamp(0.0, 1.0);
    }

    /// How many of `cards` are at or above `threshold`.
    pub fn count_at_least<'a>(
        &self,
        cards: impl IntoIterator<Item = &'a CardId>,
        threshold: f32,
    ) -> usize {
        cards
            .into_iter()
            .filter(|card| self.get(**card) >= threshold)
            .count()
    }
}

impl Default for PublicPerception {
    fn default() -> Self {
        Self::new()
    }
}
