use super::{BeliefView, BotParams, CandidateCall, MoveSelector, SelectionError};
use crate::ports::Reconciler;
use fish_core::belief::BeliefState;
use fish_core::belief::telemetry::BeliefMetrics;
use fish_core::error::{HandError, ObservationError};
use fish_core::model::call::{CallResult, CardCall, SuitCall};
use fish_core::model::card::CardId;
use fish_core::model::catalog::Catalog;
use fish_core::model::half_suit::HalfSuitId;
use fish_core::model::player::PlayerId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{Level, event};

/// Belief tracking and move advice for the agent over one match.
///
/// Observations go in through [`Advisor::apply_observed_call`] and
/// [`Advisor::apply_observed_declaration`]; both validate first and leave the
/// state untouched on error. Each returns the declarations the advisor made
/// on its own team's behalf as a consequence.
pub struct Advisor<R: Rng> {
    catalog: Catalog,
    state: BeliefState,
    params: BotParams,
    rng: R,
}

impl Advisor<StdRng> {
    pub fn seeded(
        catalog: Catalog,
        hand: &[CardId],
        params: BotParams,
        seed: u64,
    ) -> Result<Self, HandError> {
        Self::new(catalog, hand, params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Advisor<R> {
    pub fn new(
        catalog: Catalog,
        hand: &[CardId],
        params: BotParams,
        rng: R,
    ) -> Result<Self, HandError> {
        let state = BeliefState::new(&catalog, hand)?;
        event!(
            target: "fish_bot::observe",
            Level::INFO,
            hand = %describe_cards(&catalog, hand),
            team = %catalog.agent_team(),
            "advisor initialised"
        );
        Ok(Self {
            catalog,
            state,
            params,
            rng,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn params(&self) -> &BotParams {
        &self.params
    }

    pub fn state(&self) -> &BeliefState {
        &self.state
    }

    pub fn view(&self) -> BeliefView<'_> {
        BeliefView::new(&self.catalog, &self.state)
    }

    /// Runs the selection cascade for the agent's turn.
    pub fn select_move(&mut self) -> Result<CandidateCall, SelectionError> {
        let view = BeliefView::new(&self.catalog, &self.state);
        let candidate = MoveSelector::new(view, &self.params).select(&mut self.rng)?;
        event!(
            target: "fish_bot::select",
            Level::INFO,
            strategy = candidate.strategy.as_str(),
            target_player = %self.catalog.player(candidate.target).name,
            card = %self.catalog.card(candidate.card).name,
            probability = candidate.probability,
            "move selected"
        );
        Ok(candidate)
    }

    pub fn apply_observed_call(&mut self, call: CardCall) -> Result<Vec<SuitCall>, ObservationError> {
        self.state.check_card_call(&self.catalog, &call)?;
        match call.result {
            CallResult::Hit => self.state.apply_hit(&self.catalog, &call),
            _ => {
                let moved = self.state.apply_miss(&self.catalog, &call);
                event!(
                    target: "fish_bot::observe",
                    Level::DEBUG,
                    removed = moved.removed,
                    added = moved.added,
                    "miss mass redistributed"
                );
            }
        }
        event!(
            target: "fish_bot::observe",
            Level::INFO,
            sender = %self.catalog.player(call.sender).name,
            target_player = %self.catalog.player(call.target).name,
            card = %self.catalog.card(call.card).name,
            result = call.result.as_str(),
            "card call applied"
        );
        Ok(self.finish_observation())
    }

    /// Applies a resolved declaration. A failed one asks `reconciler` exactly
    /// once for the true per-seat counts of the group.
    pub fn apply_observed_declaration(
        &mut self,
        call: SuitCall,
        reconciler: &mut dyn Reconciler,
    ) -> Result<Vec<SuitCall>, ObservationError> {
        if !self.state.is_in_play(call.half_suit) {
            return Err(ObservationError::GroupAlreadyDeclared {
                group: call.half_suit,
            });
        }
        match call.result {
            CallResult::Hit => self.state.apply_declaration(&self.catalog, &call, None),
            CallResult::Miss => {
                let counts = reconciler.group_counts(self.catalog.half_suit(call.half_suit));
                self.state
                    .check_reconciliation(&self.catalog, call.half_suit, &counts)?;
                self.state
                    .apply_declaration(&self.catalog, &call, Some(&counts));
            }
            CallResult::Unknown => return Err(ObservationError::UnresolvedResult),
        }
        event!(
            target: "fish_bot::declare",
            Level::INFO,
            group = %self.catalog.half_suit(call.half_suit).name,
            team = %call.team,
            result = call.result.as_str(),
            owner = %call.owner(),
            "declaration applied"
        );
        Ok(self.finish_observation())
    }

    /// Current belief that seat `player` holds card `card`.
    pub fn query_belief(&self, player: usize, card: usize) -> Result<f32, ObservationError> {
        let player = resolve_player(player)?;
        let card = CardId::from_index(card).ok_or(ObservationError::UnknownCard { index: card })?;
        Ok(self.state.matrix().prob(player, card))
    }

    /// Known count of `group` for seat `player`; `-1` when nothing is known.
    pub fn query_group_count(&self, player: usize, group: usize) -> Result<i8, ObservationError> {
        let player = resolve_player(player)?;
        let group =
            HalfSuitId::from_index(group).ok_or(ObservationError::UnknownGroup { index: group })?;
        Ok(self.state.counters().get(player, group))
    }

    fn finish_observation(&mut self) -> Vec<SuitCall> {
        let declared = self.auto_declare();
        if tracing::enabled!(target: "fish_bot::observe", Level::DEBUG) {
            let metrics = BeliefMetrics::from_state(&self.catalog, &self.state);
            event!(
                target: "fish_bot::observe",
                Level::DEBUG,
                entropy = ?metrics.entropy_per_player,
                locked = metrics.locked_cells,
                groups_in_play = metrics.groups_in_play,
                "belief metrics"
            );
        }
        declared
    }

    /// Declares, one after another, every group the agent's team now holds
    /// with certainty. Terminates because each pass removes a group from play.
    fn auto_declare(&mut self) -> Vec<SuitCall> {
        let team = self.catalog.agent_team();
        let mut declared = Vec::new();
        while let Some(group) =
            self.state
                .fully_held_group(&self.catalog, team, self.params.certainty_tolerance)
        {
            let call = SuitCall::new(group, team, PlayerId::AGENT, CallResult::Hit);
            self.state.apply_declaration(&self.catalog, &call, None);
            event!(
                target: "fish_bot::declare",
                Level::INFO,
                group = %self.catalog.half_suit(group).name,
                team = %team,
                "automatic declaration"
            );
            declared.push(call);
        }
        declared
    }
}

fn resolve_player(index: usize) -> Result<PlayerId, ObservationError> {
    PlayerId::from_index(index).ok_or(ObservationError::UnknownPlayer { index })
}

fn describe_cards(catalog: &Catalog, cards: &[CardId]) -> String {
    cards
        .iter()
        .map(|card| catalog.card(*card).name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
