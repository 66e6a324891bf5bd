use crate::error::ObservationError;
use crate::model::card::CardId;
use crate::model::player::Team;
use crate::model::{HALF_SUIT_COUNT, HALF_SUIT_SIZE};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Dense identifier of a half-suit group, `0..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HalfSuitId(u8);

impl HalfSuitId {
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < HALF_SUIT_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = HalfSuitId> {
        (0..HALF_SUIT_COUNT as u8).map(HalfSuitId)
    }
}

impl TryFrom<u8> for HalfSuitId {
    type Error = ObservationError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index as usize).ok_or(ObservationError::UnknownGroup {
            index: index as usize,
        })
    }
}

impl From<HalfSuitId> for u8 {
    fn from(id: HalfSuitId) -> u8 {
        id.0
    }
}

impl fmt::Display for HalfSuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group{}", self.0)
    }
}

/// Six related cards that a team can declare together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalfSuit {
    pub id: HalfSuitId,
    pub name: String,
    pub cards: [CardId; HALF_SUIT_SIZE],
}

impl HalfSuit {
    pub fn new(id: HalfSuitId, name: impl Into<String>, cards: [CardId; HALF_SUIT_SIZE]) -> Self {
        Self {
            id,
            name: name.into(),
            cards,
        }
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }
}

impl fmt::Display for HalfSuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Play status of a half-suit. Once declared a group never returns to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupStatus {
    InPlay,
    Declared { owner: Team },
}

impl GroupStatus {
    pub const fn is_in_play(self) -> bool {
        matches!(self, GroupStatus::InPlay)
    }
}
