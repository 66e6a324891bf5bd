use crate::error::ObservationError;
use crate::model::CARD_COUNT;
use crate::model::half_suit::HalfSuitId;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Dense identifier of a card, `0..54`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CardId(u8);

impl CardId {
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < CARD_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < CARD_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = CardId> {
        (0..CARD_COUNT as u8).map(CardId)
    }
}

impl TryFrom<u8> for CardId {
    type Error = ObservationError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index).ok_or(ObservationError::UnknownCard {
            index: index as usize,
        })
    }
}

impl From<CardId> for u8 {
    fn from(id: CardId) -> u8 {
        id.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Catalog entry for a single card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub half_suit: HalfSuitId,
}

impl Card {
    pub fn new(id: CardId, name: impl Into<String>, half_suit: HalfSuitId) -> Self {
        Self {
            id,
            name: name.into(),
            half_suit,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{CARD_COUNT, CardId};
    use crate::error::ObservationError;

    #[test]
    fn ids_outside_the_deck_are_rejected() {
        assert!(CardId::new(53).is_some());
        assert!(CardId::new(54).is_none());
        assert!(CardId::from_index(CARD_COUNT).is_none());
        assert_eq!(
            CardId::try_from(200u8),
            Err(ObservationError::UnknownCard { index: 200 })
        );
    }

    #[test]
    fn deserializing_checks_the_range() {
        let id: CardId = serde_json::from_str("53").unwrap();
        assert_eq!(id.index(), 53);
        assert_eq!(serde_json::to_string(&id).unwrap(), "53");
        let err = serde_json::from_str::<CardId>("54").unwrap_err();
        assert!(err.to_string().contains("unknown card index 54"));
    }

    #[test]
    fn all_walks_every_card_in_order() {
        let ids: Vec<_> = CardId::all().collect();
        assert_eq!(ids.len(), CARD_COUNT);
        for (index, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), index);
        }
    }
}
