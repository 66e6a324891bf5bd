//! The cohesive belief state and the rules that keep its tables consistent.

use super::{BeliefMatrix, HalfSuitCounters, PublicPerception, Redistribution};
use crate::error::{HandError, ObservationError};
use crate::model::call::{CallResult, CardCall, SuitCall};
use crate::model::card::CardId;
use crate::model::catalog::Catalog;
use crate::model::half_suit::{GroupStatus, HalfSuitId};
use crate::model::hand::Hand;
use crate::model::player::{PlayerId, Team};
use crate::model::{HALF_SUIT_COUNT, HALF_SUIT_SIZE, HAND_SIZE, PLAYER_COUNT};
use std::collections::HashSet;

/// Everything the agent believes about the table. Owned by one engine for one
/// match and mutated only through the update methods below.
#[derive(Debug, Clone)]
pub struct BeliefState {
    matrix: BeliefMatrix,
    counters: HalfSuitCounters,
    public: PublicPerception,
    hand_sizes: [u8; PLAYER_COUNT],
    hand: Hand,
    status: [GroupStatus; HALF_SUIT_COUNT],
}

impl BeliefState {
    /// Seeds every table from the agent's nine starting cards.
    pub fn new(catalog: &Catalog, cards: &[CardId]) -> Result<Self, HandError> {
        if cards.len() != HAND_SIZE {
            return Err(HandError::WrongSize {
                expected: HAND_SIZE,
                found: cards.len(),
            });
        }
        let mut seen = HashSet::new();
        for card in cards {
            if !seen.insert(*card) {
                return Err(HandError::Duplicate { card: *card });
            }
        }

        let hand = Hand::with_cards(cards.to_vec());
        let mut state = Self {
            matrix: BeliefMatrix::from_agent_hand(&hand),
            counters: HalfSuitCounters::new(),
            public: PublicPerception::new(),
            hand_sizes: [HAND_SIZE as u8; PLAYER_COUNT],
            hand,
            status: [GroupStatus::InPlay; HALF_SUIT_COUNT],
        };
        state.sync_agent(catalog);
        Ok(state)
    }

    pub fn matrix(&self) -> &BeliefMatrix {
        &self.matrix
    }

    pub fn counters(&self) -> &HalfSuitCounters {
        &self.counters
    }

    pub fn public(&self) -> &PublicPerception {
        &self.public
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_size(&self, player: PlayerId) -> u8 {
        self.hand_sizes[player.index()]
    }

    pub fn status(&self, group: HalfSuitId) -> GroupStatus {
        self.status[group.index()]
    }

    pub fn is_in_play(&self, group: HalfSuitId) -> bool {
        self.status[group.index()].is_in_play()
    }

    /// Rejects a card call that is malformed or contradicts the agent's hand.
    pub fn check_card_call(
        &self,
        catalog: &Catalog,
        call: &CardCall,
    ) -> Result<(), ObservationError> {
        if call.sender == call.target {
            return Err(ObservationError::SelfCall {
                player: call.sender,
            });
        }
        let group = catalog.half_suit_of(call.card);
        if !self.is_in_play(group) {
            return Err(ObservationError::CardOutOfPlay {
                card: call.card,
                group,
            });
        }
        let held = self.hand.contains(call.card);
        let conflict = match call.result {
            CallResult::Hit => {
                (call.target.is_agent() && !held) || (call.sender.is_agent() && held)
            }
            CallResult::Miss => call.target.is_agent() && held,
            CallResult::Unknown => {
                return Err(ObservationError::UnresolvedResult);
            }
        };
        if conflict {
            return Err(ObservationError::ConflictsWithHand { card: call.card });
        }
        Ok(())
    }

    /// `call.sender` took `call.card` from `call.target`.
    pub fn apply_hit(&mut self, catalog: &Catalog, call: &CardCall) {
        let group = catalog.half_suit_of(call.card);
        self.matrix.assign(call.sender, call.card);

        let sender = call.sender.index();
        let target = call.target.index();
        self.hand_sizes[sender] = self.hand_sizes[sender].saturating_add(1);
        self.hand_sizes[target] = self.hand_sizes[target].saturating_sub(1);

        if call.target.is_agent() {
            self.hand.remove(call.card);
            self.public.set(call.card, 0.0);
        } else {
            self.counters.record_hit_target(call.target, group);
        }
        if call.sender.is_agent() {
            self.hand.add(call.card);
            self.public.set(call.card, 1.0);
        } else {
            self.counters.record_hit_sender(call.sender, group);
        }

        self.sync_agent(catalog);
        self.tighten(catalog, call.sender, group);
    }

    /// `call.target` did not have `call.card`, and neither does the sender.
    pub fn apply_miss(&mut self, catalog: &Catalog, call: &CardCall) -> Redistribution {
        let group = catalog.half_suit_of(call.card);
        let moved = self
            .matrix
            .redistribute_miss(call.sender, call.target, call.card);

        if call.sender.is_agent() {
            self.public.set(call.card, 0.0);
        } else {
            self.counters.record_miss_sender(call.sender, group);
        }

        self.sync_agent(catalog);
        self.tighten(catalog, call.sender, group);
        moved
    }

    /// The less of `group` that is unaccounted for, the more likely the
    /// sender holds what remains. Raises the sender's belief in every card of
    /// the group nobody certainly holds to at least `1 / (7 - known)`, locking
    /// it when that quotient rounds to one.
    fn tighten(&mut self, catalog: &Catalog, sender: PlayerId, group: HalfSuitId) {
        if sender.is_agent() {
            return;
        }
        let members = catalog.half_suit(group).cards;
        let ruled_out = members
            .iter()
            .filter(|card| self.matrix.prob(sender, **card) == 0.0)
            .count();
        let known = (self.counters.known_total(group) + ruled_out).min(HALF_SUIT_SIZE);
        let quotient = 1.0 / (HALF_SUIT_SIZE + 1 - known) as f32;
        let lock = quotient.round_ties_even() == 1.0;

        for card in members {
            if self.matrix.certain_holder(card).is_some() {
                continue;
            }
            if self.matrix.prob(sender, card) == 0.0 {
                continue;
            }
            self.matrix.raise_to(sender, card, quotient, lock);
        }
    }

    /// Checks manual per-player counts given after a failed declaration.
    pub fn check_reconciliation(
        &self,
        catalog: &Catalog,
        group: HalfSuitId,
        counts: &[u8; PLAYER_COUNT],
    ) -> Result<(), ObservationError> {
        let found: usize = counts.iter().map(|count| *count as usize).sum();
        if found != HALF_SUIT_SIZE {
            return Err(ObservationError::ReconciliationMismatch {
                group,
                expected: HALF_SUIT_SIZE,
                found,
            });
        }
        let held = self.hand.count_in(catalog.half_suit(group));
        let reported = counts[PlayerId::AGENT.index()] as usize;
        if reported != held {
            return Err(ObservationError::ReconciliationAgentMismatch {
                group,
                reported,
                held,
            });
        }
        Ok(())
    }

    /// Removes a declared group from play. `counts` carries the reconciled
    /// per-player holdings when the declaration failed; on success the
    /// declaring team's holdings are attributed from belief.
    pub fn apply_declaration(
        &mut self,
        catalog: &Catalog,
        call: &SuitCall,
        counts: Option<&[u8; PLAYER_COUNT]>,
    ) {
        let group = catalog.half_suit(call.half_suit);
        match counts {
            Some(counts) => {
                for seat in PlayerId::LOOP {
                    let slot = &mut self.hand_sizes[seat.index()];
                    *slot = slot.saturating_sub(counts[seat.index()]);
                }
            }
            None => {
                for card in group.cards {
                    if self.hand.contains(card) {
                        continue;
                    }
                    if let Some(holder) = self.likely_holder(catalog, call.team, card) {
                        let slot = &mut self.hand_sizes[holder.index()];
                        *slot = slot.saturating_sub(1);
                    }
                }
            }
        }

        for card in group.cards {
            self.matrix.zero_column(card);
            self.public.set(card, 0.0);
            self.hand.remove(card);
        }
        self.counters.clear_group(call.half_suit);
        self.status[call.half_suit.index()] = GroupStatus::Declared { owner: call.owner() };
        self.sync_agent(catalog);
    }

    /// Certain holder on `team` if any, otherwise the non-agent member with
    /// the strongest belief.
    fn likely_holder(&self, catalog: &Catalog, team: Team, card: CardId) -> Option<PlayerId> {
        let members: Vec<PlayerId> = catalog
            .members(team)
            .filter(|seat| !seat.is_agent())
            .collect();
        if let Some(holder) = members
            .iter()
            .copied()
            .find(|seat| self.matrix.cell(*seat, card).is_certain())
        {
            return Some(holder);
        }
        let mut best: Option<(PlayerId, f32)> = None;
        for seat in members {
            let prob = self.matrix.prob(seat, card);
            if best.is_none_or(|(_, top)| prob > top) {
                best = Some((seat, prob));
            }
        }
        best.map(|(seat, _)| seat)
    }

    /// First in-play group whose six cards are all certainly held by `team`.
    pub fn fully_held_group(
        &self,
        catalog: &Catalog,
        team: Team,
        tolerance: f32,
    ) -> Option<HalfSuitId> {
        let members: Vec<PlayerId> = catalog.members(team).collect();
        catalog
            .half_suits()
            .iter()
            .filter(|group| self.is_in_play(group.id))
            .find(|group| {
                let certain = group
                    .cards
                    .iter()
                    .filter(|card| {
                        members.iter().any(|seat| {
                            (self.matrix.prob(*seat, **card) - 1.0).abs() <= tolerance
                        })
                    })
                    .count();
                certain == HALF_SUIT_SIZE
            })
            .map(|group| group.id)
    }

    /// Re-derives the agent's exact counters and hand size from its hand.
    fn sync_agent(&mut self, catalog: &Catalog) {
        for group in catalog.half_suits() {
            let count = if self.is_in_play(group.id) {
                self.hand.count_in(group)
            } else {
                0
            };
            self.counters.set_exact(PlayerId::AGENT, group.id, count);
        }
        self.hand_sizes[PlayerId::AGENT.index()] = self.hand.len() as u8;
    }
}
