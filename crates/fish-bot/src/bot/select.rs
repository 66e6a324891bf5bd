//! Three-tier move selection: strongest single belief, then the opponent's
//! best-known group, then the opponent with the most cards.

use super::{BeliefView, BotParams, CostBenefitGate};
use fish_core::model::call::{CallResult, CardCall};
use fish_core::model::card::CardId;
use fish_core::model::half_suit::HalfSuitId;
use fish_core::model::player::PlayerId;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Probability,
    MinSuit,
    HandSize,
}

impl Strategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::Probability => "probability",
            Strategy::MinSuit => "min_suit",
            Strategy::HandSize => "hand_size",
        }
    }
}

/// A call the agent should make, with the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateCall {
    pub target: PlayerId,
    pub card: CardId,
    pub probability: f32,
    pub strategy: Strategy,
}

impl CandidateCall {
    pub const fn into_call(self, result: CallResult) -> CardCall {
        CardCall::new(PlayerId::AGENT, self.target, self.card, result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no strategy produced an acceptable call; thresholds are too strict for this state")]
    NoMoveFound,
}

pub struct MoveSelector<'a> {
    view: BeliefView<'a>,
    params: &'a BotParams,
    gate: CostBenefitGate,
}

impl<'a> MoveSelector<'a> {
    pub fn new(view: BeliefView<'a>, params: &'a BotParams) -> Self {
        Self {
            view,
            params,
            gate: CostBenefitGate::new(params),
        }
    }

    /// Cards the agent may ask for: not already held, and from an in-play
    /// group the agent holds at least one card of.
    pub fn eligible_cards(&self) -> Vec<CardId> {
        let hand = self.view.hand();
        self.view
            .catalog()
            .half_suits()
            .iter()
            .filter(|group| self.view.is_in_play(group.id) && hand.count_in(group) > 0)
            .flat_map(|group| group.cards)
            .filter(|card| !hand.contains(*card))
            .collect()
    }

    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CandidateCall, SelectionError> {
        let eligible = self.eligible_cards();
        let opponents: Vec<(PlayerId, usize)> = self
            .view
            .catalog()
            .opponents()
            .map(|seat| (seat, self.gate.possible_loss(&self.view, seat)))
            .collect();

        if let Some(candidate) = self.by_probability(&eligible, &opponents) {
            return Ok(candidate);
        }
        log_fallthrough(Strategy::Probability, eligible.len());

        if let Some(candidate) = self.by_min_suit(&eligible, &opponents, rng) {
            return Ok(candidate);
        }
        log_fallthrough(Strategy::MinSuit, eligible.len());

        if let Some(candidate) = self.by_hand_size(&eligible, &opponents, rng) {
            return Ok(candidate);
        }

        tracing::warn!(
            target: "fish_bot::select",
            eligible = eligible.len(),
            min_probability = self.params.min_probability,
            risk_factor = self.params.risk_factor,
            "no strategy produced a call"
        );
        Err(SelectionError::NoMoveFound)
    }

    fn by_probability(
        &self,
        eligible: &[CardId],
        opponents: &[(PlayerId, usize)],
    ) -> Option<CandidateCall> {
        let mut best: Option<CandidateCall> = None;
        for card in eligible {
            for (opponent, loss) in opponents {
                let probability = self.view.probability(*opponent, *card);
                if probability < self.params.min_probability {
                    continue;
                }
                if !self.gate.accepts(probability, *loss) {
                    continue;
                }
                if best.is_none_or(|top| probability > top.probability) {
                    best = Some(CandidateCall {
                        target: *opponent,
                        card: *card,
                        probability,
                        strategy: Strategy::Probability,
                    });
                }
            }
        }
        best
    }

    fn by_min_suit<R: Rng + ?Sized>(
        &self,
        eligible: &[CardId],
        opponents: &[(PlayerId, usize)],
        rng: &mut R,
    ) -> Option<CandidateCall> {
        let catalog = self.view.catalog();
        let mut best: Option<(PlayerId, usize, HalfSuitId, i8)> = None;
        for (opponent, loss) in opponents {
            for group in catalog.half_suits() {
                if !eligible.iter().any(|card| group.contains(*card)) {
                    continue;
                }
                let count = self.view.group_count(*opponent, group.id);
                if best.is_none_or(|(_, _, _, top)| count > top) {
                    best = Some((*opponent, *loss, group.id, count));
                }
            }
        }

        let (opponent, loss, group, _) = best?;
        let members = catalog.half_suit(group);
        let candidates: Vec<CandidateCall> = eligible
            .iter()
            .filter(|card| members.contains(**card))
            .filter_map(|card| {
                let probability = self.view.probability(opponent, *card);
                (probability >= self.params.min_suit_probability
                    && self.gate.accepts(probability, loss))
                .then_some(CandidateCall {
                    target: opponent,
                    card: *card,
                    probability,
                    strategy: Strategy::MinSuit,
                })
            })
            .collect();
        candidates.choose(rng).copied()
    }

    fn by_hand_size<R: Rng + ?Sized>(
        &self,
        eligible: &[CardId],
        opponents: &[(PlayerId, usize)],
        rng: &mut R,
    ) -> Option<CandidateCall> {
        let mut best: Option<(PlayerId, usize, u8)> = None;
        for (opponent, loss) in opponents {
            let size = self.view.hand_size(*opponent);
            if best.is_none_or(|(_, _, top)| size > top) {
                best = Some((*opponent, *loss, size));
            }
        }

        let (opponent, loss, _) = best?;
        let candidates: Vec<CandidateCall> = eligible
            .iter()
            .filter_map(|card| {
                let probability = self.view.probability(opponent, *card);
                (probability > 0.0 && self.gate.accepts(probability, loss)).then_some(
                    CandidateCall {
                        target: opponent,
                        card: *card,
                        probability,
                        strategy: Strategy::HandSize,
                    },
                )
            })
            .collect();
        candidates.choose(rng).copied()
    }
}

fn log_fallthrough(strategy: Strategy, eligible: usize) {
    event!(
        target: "fish_bot::select",
        Level::DEBUG,
        strategy = strategy.as_str(),
        eligible,
        "strategy found no candidate"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use fish_core::belief::BeliefState;
    use fish_core::model::catalog::{Catalog, DEFAULT_PLAYER_NAMES};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> Catalog {
        Catalog::standard(&DEFAULT_PLAYER_NAMES).unwrap()
    }

    fn seat(index: usize) -> PlayerId {
        PlayerId::from_index(index).unwrap()
    }

    fn state(catalog: &Catalog, names: &[&str]) -> BeliefState {
        BeliefState::new(catalog, &catalog.cards_by_name(names).unwrap()).unwrap()
    }

    #[test]
    fn eligible_cards_need_a_foothold_and_skip_owned_cards() {
        let catalog = catalog();
        let state = state(
            &catalog,
            &["2C", "3C", "4C", "5C", "6C", "9D", "10D", "JD", "QD"],
        );
        let params = BotParams::default();
        let selector = MoveSelector::new(BeliefView::new(&catalog, &state), &params);
        let names: Vec<_> = selector
            .eligible_cards()
            .into_iter()
            .map(|card| catalog.card(card).name.clone())
            .collect();
        assert_eq!(names, vec!["7C", "KD", "AD"]);
    }

    #[test]
    fn probability_tier_picks_the_strongest_opponent_belief() {
        let catalog = catalog();
        let mut state = state(
            &catalog,
            &["2C", "9C", "2D", "9D", "2H", "9H", "2S", "9S", "8C"],
        );
        let queen = catalog.card_by_name("QS").unwrap();
        state.apply_hit(
            &catalog,
            &CardCall::new(seat(3), seat(2), queen, CallResult::Hit),
        );
        let params = BotParams::default();
        let selector = MoveSelector::new(BeliefView::new(&catalog, &state), &params);
        let candidate = selector.select(&mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(candidate.strategy, Strategy::Probability);
        assert_eq!(candidate.target, seat(3));
        assert_eq!(candidate.card, queen);
        assert_eq!(candidate.probability, 1.0);
    }

    #[test]
    fn min_suit_tier_targets_the_best_known_group() {
        let catalog = catalog();
        let mut state = state(
            &catalog,
            &["2C", "9C", "2D", "9D", "2H", "9H", "2S", "9S", "8C"],
        );
        let seven = catalog.card_by_name("7H").unwrap();
        state.apply_miss(
            &catalog,
            &CardCall::new(seat(5), seat(2), seven, CallResult::Miss),
        );
        let params = BotParams::default();
        let selector = MoveSelector::new(BeliefView::new(&catalog, &state), &params);
        let candidate = selector.select(&mut StdRng::seed_from_u64(11)).unwrap();

        assert_eq!(candidate.strategy, Strategy::MinSuit);
        assert_eq!(candidate.target, seat(5));
        assert_eq!(catalog.half_suit_of(candidate.card), catalog.half_suit_of(seven));
        assert_ne!(candidate.card, seven);
        assert!(candidate.probability > 0.0);
    }

    #[test]
    fn strict_thresholds_fall_back_to_hand_size() {
        let catalog = catalog();
        let mut state = state(
            &catalog,
            &["2C", "9C", "2D", "9D", "2H", "9H", "2S", "9S", "8C"],
        );
        let king = catalog.card_by_name("KH").unwrap();
        state.apply_hit(
            &catalog,
            &CardCall::new(seat(3), seat(4), king, CallResult::Hit),
        );
        let params = BotParams {
            min_probability: 1.01,
            min_suit_probability: 1.01,
            ..BotParams::default()
        };
        let selector = MoveSelector::new(BeliefView::new(&catalog, &state), &params);
        let candidate = selector.select(&mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(candidate.strategy, Strategy::HandSize);
        assert_eq!(candidate.target, seat(3));
        assert!(candidate.probability > 0.0);
    }

    #[test]
    fn exhausted_tiers_report_no_move() {
        let catalog = catalog();
        let state = state(
            &catalog,
            &["2C", "9C", "2D", "9D", "2H", "9H", "2S", "9S", "8C"],
        );
        let params = BotParams {
            min_probability: 1.01,
            min_suit_probability: 1.01,
            risk_factor: 0.0,
            ..BotParams::default()
        };
        let selector = MoveSelector::new(BeliefView::new(&catalog, &state), &params);
        assert_eq!(
            selector.select(&mut StdRng::seed_from_u64(1)),
            Err(SelectionError::NoMoveFound)
        );
    }

    #[test]
    fn candidate_becomes_an_agent_call() {
        let candidate = CandidateCall {
            target: seat(1),
            card: CardId::new(4).unwrap(),
            probability: 0.4,
            strategy: Strategy::MinSuit,
        };
        let call = candidate.into_call(CallResult::Miss);
        assert_eq!(call.sender, PlayerId::AGENT);
        assert_eq!(call.target, seat(1));
        assert_eq!(call.result, CallResult::Miss);
    }
}
