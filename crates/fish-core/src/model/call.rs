//! Resolved moves reported to the engine.

use crate::model::card::CardId;
use crate::model::catalog::Catalog;
use crate::model::half_suit::HalfSuitId;
use crate::model::player::{PlayerId, Team};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallResult {
    Hit,
    Miss,
    Unknown,
}

impl CallResult {
    pub const fn as_str(self) -> &'static str {
        match self {
            CallResult::Hit => "hit",
            CallResult::Miss => "miss",
            CallResult::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `sender` asked `target` for `card`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCall {
    pub sender: PlayerId,
    pub target: PlayerId,
    pub card: CardId,
    pub result: CallResult,
}

impl CardCall {
    pub const fn new(sender: PlayerId, target: PlayerId, card: CardId, result: CallResult) -> Self {
        Self {
            sender,
            target,
            card,
            result,
        }
    }
}

/// `team` (through `sender`) claimed to hold all of `half_suit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitCall {
    pub half_suit: HalfSuitId,
    pub team: Team,
    pub sender: PlayerId,
    pub result: CallResult,
}

impl SuitCall {
    pub const fn new(half_suit: HalfSuitId, team: Team, sender: PlayerId, result: CallResult) -> Self {
        Self {
            half_suit,
            team,
            sender,
            result,
        }
    }

    /// Team credited with the group once resolved.
    pub fn owner(&self) -> Team {
        match self.result {
            CallResult::Miss => self.team.other(),
            CallResult::Hit | CallResult::Unknown => self.team,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveRecord {
    Card(CardCall),
    Suit(SuitCall),
}

impl MoveRecord {
    /// Renders the record as a `;`-separated line using catalog names:
    /// `sender;target;card;result` or `sender;team;group;result`.
    pub fn to_line(&self, catalog: &Catalog) -> String {
        match self {
            MoveRecord::Card(call) => format!(
                "{};{};{};{}",
                catalog.player(call.sender).name,
                catalog.player(call.target).name,
                catalog.card(call.card).name,
                call.result
            ),
            MoveRecord::Suit(call) => format!(
                "{};{};{};{}",
                catalog.player(call.sender).name,
                call.team,
                catalog.half_suit(call.half_suit).name,
                call.result
            ),
        }
    }
}

impl From<CardCall> for MoveRecord {
    fn from(call: CardCall) -> Self {
        MoveRecord::Card(call)
    }
}

impl From<SuitCall> for MoveRecord {
    fn from(call: SuitCall) -> Self {
        MoveRecord::Suit(call)
    }
}
