use crate::error::ObservationError;
use crate::model::PLAYER_COUNT;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub const fn other(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Team::Red => "Red",
            Team::Blue => "Blue",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seat identifier, `0..6`. Seat 0 is the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    pub const AGENT: PlayerId = PlayerId(0);

    pub const LOOP: [PlayerId; PLAYER_COUNT] = [
        PlayerId(0),
        PlayerId(1),
        PlayerId(2),
        PlayerId(3),
        PlayerId(4),
        PlayerId(5),
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < PLAYER_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_agent(self) -> bool {
        self.0 == 0
    }

    /// Standard seating alternates teams around the table, agent first.
    pub const fn standard_team(self, agent_team: Team) -> Team {
        if self.0 % 2 == 0 {
            agent_team
        } else {
            agent_team.other()
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = ObservationError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index as usize).ok_or(ObservationError::UnknownPlayer {
            index: index as usize,
        })
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> u8 {
        id.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: Team,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, team: Team) -> Self {
        Self {
            id,
            name: name.into(),
            team,
        }
    }
}
