//! Outward requests the advisor makes to whoever runs the match.

use fish_core::model::PLAYER_COUNT;
use fish_core::model::half_suit::HalfSuit;

/// Answers "how many cards of this group did each seat actually hold?" after
/// a declaration fails. Counts are indexed by seat and must total six.
pub trait Reconciler {
    fn group_counts(&mut self, group: &HalfSuit) -> [u8; PLAYER_COUNT];
}

impl<F> Reconciler for F
where
    F: FnMut(&HalfSuit) -> [u8; PLAYER_COUNT],
{
    fn group_counts(&mut self, group: &HalfSuit) -> [u8; PLAYER_COUNT] {
        self(group)
    }
}
