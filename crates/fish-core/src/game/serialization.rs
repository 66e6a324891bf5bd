use crate::belief::BeliefState;
use crate::model::card::CardId;
use crate::model::catalog::Catalog;
use crate::model::half_suit::GroupStatus;
use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Point-in-time dump of a belief state, for debugging and replay output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeliefSnapshot {
    pub hand: Vec<String>,
    pub hand_sizes: Vec<u8>,
    /// `probabilities[player][card]`.
    pub probabilities: Vec<Vec<f32>>,
    /// `(player, card)` pairs whose value was forced by elimination.
    pub locked: Vec<(PlayerId, CardId)>,
    /// `group_counts[player][group]`.
    pub group_counts: Vec<Vec<i8>>,
    pub public: Vec<f32>,
    pub groups: Vec<GroupStatus>,
}

impl BeliefSnapshot {
    pub fn capture(catalog: &Catalog, state: &BeliefState) -> Self {
        let matrix = state.matrix();
        let mut locked = Vec::new();
        let mut probabilities: Vec<Vec<f32>> = Vec::with_capacity(PlayerId::LOOP.len());
        let mut group_counts: Vec<Vec<i8>> = Vec::with_capacity(PlayerId::LOOP.len());
        for seat in PlayerId::LOOP {
            probabilities.push(CardId::all().map(|card| matrix.prob(seat, card)).collect());
            locked.extend(
                CardId::all()
                    .filter(|card| matrix.is_locked(seat, *card))
                    .map(|card| (seat, card)),
            );
            group_counts.push(
                catalog
                    .half_suits()
                    .iter()
                    .map(|group| state.counters().get(seat, group.id))
                    .collect(),
            );
        }

        BeliefSnapshot {
            hand: state
                .hand()
                .iter()
                .map(|card| catalog.card(*card).name.clone())
                .collect(),
            hand_sizes: PlayerId::LOOP
                .iter()
                .map(|seat| state.hand_size(*seat))
                .collect(),
            probabilities,
            locked,
            group_counts,
            public: CardId::all().map(|card| state.public().get(card)).collect(),
            groups: catalog
                .half_suits()
                .iter()
                .map(|group| state.status(group.id))
                .collect(),
        }
    }

    pub fn to_json(catalog: &Catalog, state: &BeliefState) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(catalog, state))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
