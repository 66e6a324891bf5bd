use fish_core::belief::BeliefState;
use fish_core::model::card::CardId;
use fish_core::model::catalog::Catalog;
use fish_core::model::half_suit::HalfSuitId;
use fish_core::model::hand::Hand;
use fish_core::model::player::PlayerId;

/// Read-only view over the advisor's belief state used by the planners.
#[derive(Debug, Clone, Copy)]
pub struct BeliefView<'a> {
    catalog: &'a Catalog,
    state: &'a BeliefState,
}

impl<'a> BeliefView<'a> {
    pub fn new(catalog: &'a Catalog, state: &'a BeliefState) -> Self {
        Self { catalog, state }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn state(&self) -> &'a BeliefState {
        self.state
    }

    pub fn hand(&self) -> &'a Hand {
        self.state.hand()
    }

    pub fn probability(&self, player: PlayerId, card: CardId) -> f32 {
        self.state.matrix().prob(player, card)
    }

    pub fn is_locked(&self, player: PlayerId, card: CardId) -> bool {
        self.state.matrix().is_locked(player, card)
    }

    pub fn group_count(&self, player: PlayerId, group: HalfSuitId) -> i8 {
        self.state.counters().get(player, group)
    }

    pub fn hand_size(&self, player: PlayerId) -> u8 {
        self.state.hand_size(player)
    }

    pub fn public(&self, card: CardId) -> f32 {
        self.state.public().get(card)
    }

    pub fn is_in_play(&self, group: HalfSuitId) -> bool {
        self.state.is_in_play(group)
    }

    /// Summed belief that `player` holds each card of `group`.
    pub fn group_mass(&self, player: PlayerId, group: HalfSuitId) -> f32 {
        self.catalog
            .half_suit(group)
            .cards
            .iter()
            .map(|card| self.probability(player, *card))
            .sum()
    }

    pub fn certain_holder(&self, card: CardId) -> Option<PlayerId> {
        self.state.matrix().certain_holder(card)
    }
}
