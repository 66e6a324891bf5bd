use crate::model::half_suit::HalfSuitId;
use crate::model::player::PlayerId;
use crate::model::{HALF_SUIT_COUNT, HALF_SUIT_SIZE, PLAYER_COUNT};

/// Counter value meaning "nothing known about this player and group".
pub const UNKNOWN_COUNT: i8 = -1;

/// How many cards of each group a player is known to hold.
///
/// `-1` is unknown, `0` is confirmed none, `n >= 1` is "at least `n`". The
/// agent's row is always exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfSuitCounters {
    counts: [[i8; HALF_SUIT_COUNT]; PLAYER_COUNT],
}

impl HalfSuitCounters {
    pub fn new() -> Self {
        Self {
            counts: [[UNKNOWN_COUNT; HALF_SUIT_COUNT]; PLAYER_COUNT],
        }
    }

    pub fn get(&self, player: PlayerId, group: HalfSuitId) -> i8 {
        self.counts[player.index()][group.index()]
    }

    pub fn set_exact(&mut self, player: PlayerId, group: HalfSuitId, count: usize) {
        self.counts[player.index()][group.index()] = count.min(HALF_SUIT_SIZE) as i8;
    }

    /// A caller only asks for a card of a group it already holds, so after a
    /// hit it holds at least two.
    pub fn record_hit_sender(&mut self, player: PlayerId, group: HalfSuitId) {
        let slot = &mut self.counts[player.index()][group.index()];
        *slot = (*slot + 1).clamp(2, HALF_SUIT_SIZE as i8);
    }

    pub fn record_hit_target(&mut self, player: PlayerId, group: HalfSuitId) {
        let slot = &mut self.counts[player.index()][group.index()];
        if *slot > 0 {
            *slot -= 1;
        }
    }

    pub fn record_miss_sender(&mut self, player: PlayerId, group: HalfSuitId) {
        let slot = &mut self.counts[player.index()][group.index()];
        *slot = (*slot).max(1);
    }

    /// Group left play: nobody holds any of it.
    pub fn clear_group(&mut self, group: HalfSuitId) {
        for seat in PlayerId::LOOP {
            self.counts[seat.index()][group.index()] = 0;
        }
    }

    /// Cards of `group` accounted for across the table (unknowns count as zero).
    pub fn known_total(&self, group: HalfSuitId) -> usize {
        PlayerId::LOOP
            .iter()
            .map(|seat| self.get(*seat, group).max(0) as usize)
            .sum()
    }
}

impl Default for HalfSuitCounters {
    fn default() -> Self {
        Self::new()
    }
}
