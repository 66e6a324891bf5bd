use super::CERTAINTY_EPSILON;
use crate::model::card::CardId;
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::{CARD_COUNT, PLAYER_COUNT};

/// One (player, card) entry. `locked` marks a value forced by elimination,
/// kept apart from the probability itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BeliefCell {
    pub probability: f32,
    pub locked: bool,
}

impl BeliefCell {
    pub const ZERO: BeliefCell = BeliefCell {
        probability: 0.0,
        locked: false,
    };

    pub const CERTAIN: BeliefCell = BeliefCell {
        probability: 1.0,
        locked: false,
    };

    pub fn is_certain(self) -> bool {
        self.locked || self.probability >= 1.0 - CERTAINTY_EPSILON
    }
}

/// Mass moved by a miss update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Redistribution {
    /// Mass taken from the sender and target.
    pub removed: f32,
    /// Mass handed to the bystanders before clamping.
    pub added: f32,
}

/// Heuristic ownership probabilities. Columns are not normalised.
#[derive(Debug, Clone)]
pub struct BeliefMatrix {
    cells: [[BeliefCell; CARD_COUNT]; PLAYER_COUNT],
}

impl BeliefMatrix {
    /// Agent row mirrors `hand`; every other seat starts at an even share of
    /// the cards the agent does not hold.
    pub fn from_agent_hand(hand: &Hand) -> Self {
        let share = 1.0 / (PLAYER_COUNT - 1) as f32;
        let mut cells = [[BeliefCell::ZERO; CARD_COUNT]; PLAYER_COUNT];
        for card in CardId::all() {
            if hand.contains(card) {
                cells[PlayerId::AGENT.index()][card.index()] = BeliefCell::CERTAIN;
                continue;
            }
            for seat in PlayerId::LOOP.iter().skip(1) {
                cells[seat.index()][card.index()].probability = share;
            }
        }
        Self { cells }
    }

    pub fn cell(&self, player: PlayerId, card: CardId) -> BeliefCell {
        self.cells[player.index()][card.index()]
    }

    pub fn prob(&self, player: PlayerId, card: CardId) -> f32 {
        self.cells[player.index()][card.index()].probability
    }

    pub fn is_locked(&self, player: PlayerId, card: CardId) -> bool {
        self.cells[player.index()][card.index()].locked
    }

    /// Sum of the card's column over all seats.
    pub fn column_mass(&self, card: CardId) -> f32 {
        PlayerId::LOOP
            .iter()
            .map(|seat| self.cells[seat.index()][card.index()].probability)
            .sum()
    }

    /// First seat whose cell for `card` is certain.
    pub fn certain_holder(&self, card: CardId) -> Option<PlayerId> {
        PlayerId::LOOP
            .iter()
            .copied()
            .find(|seat| self.cell(*seat, card).is_certain())
    }

    /// `holder` owns `card` for sure; everybody else is cleared.
    pub fn assign(&mut self, holder: PlayerId, card: CardId) {
        self.zero_column(card);
        self.cells[holder.index()][card.index()] = BeliefCell::CERTAIN;
    }

    pub fn zero_column(&mut self, card: CardId) {
        for seat in PlayerId::LOOP {
            self.cells[seat.index()][card.index()] = BeliefCell::ZERO;
        }
    }

    /// Neither `sender` nor `target` holds `card`. Each of them splits its mass
    /// in fifths over the other five seats; fifths landing on a seat known not
    /// to hold the card (the other party, or the agent, whose row mirrors its
    /// hand) are forwarded, so the bystanders share the combined mass evenly.
    pub fn redistribute_miss(
        &mut self,
        sender: PlayerId,
        target: PlayerId,
        card: CardId,
    ) -> Redistribution {
        let from_sender = self.prob(sender, card);
        let from_target = self.prob(target, card);
        let removed = from_sender + from_target;

        let bystanders: Vec<PlayerId> = PlayerId::LOOP
            .iter()
            .copied()
            .filter(|seat| *seat != sender && *seat != target && !seat.is_agent())
            .collect();
        let share = removed / bystanders.len() as f32;
        let mut added = 0.0;
        for seat in &bystanders {
            let cell = &mut self.cells[seat.index()][card.index()];
            cell.probability = (cell.probability + share).min(1.0);
            added += share;
        }

        self.cells[sender.index()][card.index()] = BeliefCell::ZERO;
        self.cells[target.index()][card.index()] = BeliefCell::ZERO;
        Redistribution { removed, added }
    }

    /// Raises `player`'s belief in `card` to at least `floor`, optionally locking it.
    pub fn raise_to(&mut self, player: PlayerId, card: CardId, floor: f32, lock: bool) {
        let cell = &mut self.cells[player.index()][card.index()];
        cell.probability = cell.probability.max(floor).min(1.0);
        if lock {
            cell.probability = 1.0;
            cell.locked = true;
        }
    }

    pub fn locked_cells(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.locked)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(index: u8) -> CardId {
        CardId::new(index).unwrap()
    }

    fn seat(index: usize) -> PlayerId {
        PlayerId::from_index(index).unwrap()
    }

    #[test]
    fn prior_mirrors_agent_hand() {
        let hand = Hand::with_cards(vec![card(0), card(10)]);
        let matrix = BeliefMatrix::from_agent_hand(&hand);
        assert_eq!(matrix.prob(PlayerId::AGENT, card(0)), 1.0);
        assert_eq!(matrix.prob(seat(3), card(0)), 0.0);
        assert_eq!(matrix.prob(PlayerId::AGENT, card(1)), 0.0);
        for other in 1..PLAYER_COUNT {
            assert!((matrix.prob(seat(other), card(1)) - 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn miss_conserves_column_mass() {
        let mut matrix = BeliefMatrix::from_agent_hand(&Hand::new());
        let before = matrix.column_mass(card(5));
        let moved = matrix.redistribute_miss(seat(1), seat(2), card(5));
        assert_eq!(matrix.prob(seat(1), card(5)), 0.0);
        assert_eq!(matrix.prob(seat(2), card(5)), 0.0);
        assert!((moved.removed - 0.4).abs() < 1e-6);
        assert!((moved.added - moved.removed).abs() < 1e-6);
        assert!((matrix.column_mass(card(5)) - before).abs() < 1e-5);
        assert_eq!(matrix.prob(PlayerId::AGENT, card(5)), 0.0);
        assert!((matrix.prob(seat(3), card(5)) - (0.2 + 0.4 / 3.0)).abs() < 1e-6);
    }

    #[test]
    fn raise_never_lowers_and_lock_forces_certainty() {
        let mut matrix = BeliefMatrix::from_agent_hand(&Hand::new());
        matrix.raise_to(seat(4), card(9), 0.1, false);
        assert!((matrix.prob(seat(4), card(9)) - 0.2).abs() < 1e-6);
        matrix.raise_to(seat(4), card(9), 1.0, true);
        assert!(matrix.is_locked(seat(4), card(9)));
        assert_eq!(matrix.certain_holder(card(9)), Some(seat(4)));
        assert_eq!(matrix.locked_cells(), 1);
    }

    #[test]
    fn assign_clears_the_rest_of_the_column() {
        let mut matrix = BeliefMatrix::from_agent_hand(&Hand::new());
        matrix.assign(seat(5), card(20));
        for other in PlayerId::LOOP {
            let expected = if other == seat(5) { 1.0 } else { 0.0 };
            assert_eq!(matrix.prob(other, card(20)), expected);
        }
    }
}
