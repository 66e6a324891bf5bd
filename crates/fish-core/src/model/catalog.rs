//! Immutable description of the table: cards, half-suits, players and teams.

use crate::error::{CatalogError, HandError};
use crate::model::card::{Card, CardId};
use crate::model::half_suit::{HalfSuit, HalfSuitId};
use crate::model::player::{Player, PlayerId, Team};
use crate::model::{CARD_COUNT, HALF_SUIT_COUNT, HALF_SUIT_SIZE, PLAYER_COUNT};
use std::collections::HashSet;

pub const DEFAULT_PLAYER_NAMES: [&str; PLAYER_COUNT] = ["agent", "p1", "p2", "p3", "p4", "p5"];

const SUITS: [(&str, &str); 4] = [
    ("C", "clubs"),
    ("D", "diamonds"),
    ("H", "hearts"),
    ("S", "spades"),
];
const LOW_RANKS: [&str; HALF_SUIT_SIZE] = ["2", "3", "4", "5", "6", "7"];
const HIGH_RANKS: [&str; HALF_SUIT_SIZE] = ["9", "10", "J", "Q", "K", "A"];

/// Validated catalog shared read-only by every engine component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    cards: Vec<Card>,
    half_suits: Vec<HalfSuit>,
    players: Vec<Player>,
}

impl Catalog {
    /// Builds a catalog from explicit parts, checking the fixed table shape.
    pub fn new(
        cards: Vec<Card>,
        half_suits: Vec<HalfSuit>,
        players: Vec<Player>,
    ) -> Result<Self, CatalogError> {
        expect_count("cards", CARD_COUNT, cards.len())?;
        expect_count("half-suits", HALF_SUIT_COUNT, half_suits.len())?;
        expect_count("players", PLAYER_COUNT, players.len())?;

        for (position, card) in cards.iter().enumerate() {
            if card.id.index() != position {
                return Err(CatalogError::IdMismatch {
                    what: "card",
                    position,
                    id: card.id.index(),
                });
            }
        }
        unique_names(cards.iter().map(|card| card.name.as_str()))?;

        let mut seen = HashSet::new();
        for (position, group) in half_suits.iter().enumerate() {
            if group.id.index() != position {
                return Err(CatalogError::IdMismatch {
                    what: "half-suit",
                    position,
                    id: group.id.index(),
                });
            }
            for card in group.cards {
                if !seen.insert(card) {
                    return Err(CatalogError::CardInSeveralGroups { card });
                }
                if cards[card.index()].half_suit != group.id {
                    return Err(CatalogError::GroupMismatch {
                        card,
                        group: cards[card.index()].half_suit,
                    });
                }
            }
        }
        unique_names(half_suits.iter().map(|group| group.name.as_str()))?;

        for (position, player) in players.iter().enumerate() {
            if player.id.index() != position {
                return Err(CatalogError::IdMismatch {
                    what: "player",
                    position,
                    id: player.id.index(),
                });
            }
        }
        unique_names(players.iter().map(|player| player.name.as_str()))?;
        for team in [Team::Red, Team::Blue] {
            let found = players.iter().filter(|player| player.team == team).count();
            if found != PLAYER_COUNT / 2 {
                return Err(CatalogError::TeamImbalance { team, found });
            }
        }

        Ok(Self {
            cards,
            half_suits,
            players,
        })
    }

    /// The standard Fish deck: low and high halves of each suit plus the
    /// eights-and-jokers group, seated with the agent on the Blue team.
    pub fn standard(names: &[&str; PLAYER_COUNT]) -> Result<Self, CatalogError> {
        let mut cards = Vec::with_capacity(CARD_COUNT);
        let mut half_suits = Vec::with_capacity(HALF_SUIT_COUNT);

        let mut push_group = |name: String, card_names: [String; HALF_SUIT_SIZE]| {
            let group = HalfSuitId::from_index(half_suits.len()).expect("nine groups");
            let members = card_names.map(|card_name| {
                let id = CardId::from_index(cards.len()).expect("54 cards");
                cards.push(Card::new(id, card_name, group));
                id
            });
            half_suits.push(HalfSuit::new(group, name, members));
        };

        for (symbol, suit) in SUITS {
            push_group(
                format!("low-{suit}"),
                LOW_RANKS.map(|rank| format!("{rank}{symbol}")),
            );
            push_group(
                format!("high-{suit}"),
                HIGH_RANKS.map(|rank| format!("{rank}{symbol}")),
            );
        }
        push_group(
            "eights-jokers".to_string(),
            ["8C", "8D", "8H", "8S", "RJ", "BJ"].map(str::to_string),
        );

        let players = PlayerId::LOOP
            .iter()
            .zip(names.iter())
            .map(|(id, name)| Player::new(*id, *name, id.standard_team(Team::Blue)))
            .collect();

        Self::new(cards, half_suits, players)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn half_suits(&self) -> &[HalfSuit] {
        &self.half_suits
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.index()]
    }

    pub fn half_suit(&self, id: HalfSuitId) -> &HalfSuit {
        &self.half_suits[id.index()]
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn half_suit_of(&self, card: CardId) -> HalfSuitId {
        self.cards[card.index()].half_suit
    }

    pub fn team_of(&self, player: PlayerId) -> Team {
        self.players[player.index()].team
    }

    pub fn agent_team(&self) -> Team {
        self.team_of(PlayerId::AGENT)
    }

    /// Players on the other team from the agent, in seat order.
    pub fn opponents(&self) -> impl Iterator<Item = PlayerId> + '_ {
        let team = self.agent_team();
        self.players
            .iter()
            .filter(move |player| player.team != team)
            .map(|player| player.id)
    }

    /// Members of `team`, in seat order.
    pub fn members(&self, team: Team) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(move |player| player.team == team)
            .map(|player| player.id)
    }

    pub fn card_by_name(&self, name: &str) -> Option<CardId> {
        let name = name.trim();
        self.cards
            .iter()
            .find(|card| card.name.eq_ignore_ascii_case(name))
            .map(|card| card.id)
    }

    /// Resolves a list of card names, keeping input order.
    pub fn cards_by_name<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<CardId>, HandError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.card_by_name(name)
                    .ok_or_else(|| HandError::Unrecognized {
                        name: name.to_string(),
                    })
            })
            .collect()
    }

    pub fn half_suit_by_name(&self, name: &str) -> Option<HalfSuitId> {
        let name = name.trim();
        self.half_suits
            .iter()
            .find(|group| group.name.eq_ignore_ascii_case(name))
            .map(|group| group.id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<PlayerId> {
        let name = name.trim();
        self.players
            .iter()
            .find(|player| player.name.eq_ignore_ascii_case(name))
            .map(|player| player.id)
    }
}

fn expect_count(what: &'static str, expected: usize, found: usize) -> Result<(), CatalogError> {
    if expected == found {
        Ok(())
    } else {
        Err(CatalogError::Count {
            what,
            expected,
            found,
        })
    }
}

fn unique_names<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.to_ascii_lowercase()) {
            return Err(CatalogError::DuplicateName {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
