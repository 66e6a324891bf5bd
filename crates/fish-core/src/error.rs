//! Error types surfaced by the catalog, the agent hand and the observation protocol.

use crate::model::card::CardId;
use crate::model::half_suit::HalfSuitId;
use crate::model::player::{PlayerId, Team};
use thiserror::Error;

/// A catalog that does not describe the fixed 6-player / 54-card / 9-group game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("expected {expected} {what} but found {found}")]
    Count {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{what} at position {position} carries id {id}")]
    IdMismatch {
        what: &'static str,
        position: usize,
        id: usize,
    },
    #[error("card {card} is listed in more than one half-suit")]
    CardInSeveralGroups { card: CardId },
    #[error("card {card} is not a member of the half-suit it names ({group})")]
    GroupMismatch { card: CardId, group: HalfSuitId },
    #[error("name '{name}' is used more than once")]
    DuplicateName { name: String },
    #[error("team {team} has {found} players, expected 3")]
    TeamImbalance { team: Team, found: usize },
}

/// The agent's starting hand is unusable. Fatal until corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("hand must contain exactly {expected} cards, got {found}")]
    WrongSize { expected: usize, found: usize },
    #[error("card {card} appears more than once in the hand")]
    Duplicate { card: CardId },
    #[error("card '{name}' is not in the catalog")]
    Unrecognized { name: String },
}

/// A malformed or contradictory observation. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservationError {
    #[error("unknown card index {index}")]
    UnknownCard { index: usize },
    #[error("unknown player index {index}")]
    UnknownPlayer { index: usize },
    #[error("unknown half-suit index {index}")]
    UnknownGroup { index: usize },
    #[error("{player} cannot call a card from themselves")]
    SelfCall { player: PlayerId },
    #[error("card {card} belongs to {group}, which has already been declared")]
    CardOutOfPlay { card: CardId, group: HalfSuitId },
    #[error("half-suit {group} has already been declared")]
    GroupAlreadyDeclared { group: HalfSuitId },
    #[error("observation about {card} contradicts the agent's hand")]
    ConflictsWithHand { card: CardId },
    #[error("observations must be resolved as hit or miss")]
    UnresolvedResult,
    #[error(
        "reconciliation for {group} is inconsistent: counts total {found}, expected {expected}"
    )]
    ReconciliationMismatch {
        group: HalfSuitId,
        expected: usize,
        found: usize,
    },
    #[error("reconciliation for {group} reports {reported} agent cards but the agent holds {held}")]
    ReconciliationAgentMismatch {
        group: HalfSuitId,
        reported: usize,
        held: usize,
    },
}
