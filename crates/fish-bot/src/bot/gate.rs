use super::{BeliefView, BotParams};
use fish_core::model::player::PlayerId;

/// Accepts a call only when the expected loss from a miss is smaller than
/// the weighted gain from a hit.
#[derive(Debug, Clone, Copy)]
pub struct CostBenefitGate {
    loss_count_threshold: f32,
    risk_factor: f32,
}

impl CostBenefitGate {
    pub fn new(params: &BotParams) -> Self {
        Self {
            loss_count_threshold: params.loss_count_threshold,
            risk_factor: params.risk_factor,
        }
    }

    /// Publicly exposed cards in every in-play group `opponent` is known to
    /// hold a card of.
    pub fn possible_loss(&self, view: &BeliefView<'_>, opponent: PlayerId) -> usize {
        view.catalog()
            .half_suits()
            .iter()
            .filter(|group| view.is_in_play(group.id) && view.group_count(opponent, group.id) >= 1)
            .map(|group| {
                view.state()
                    .public()
                    .count_at_least(&group.cards, self.loss_count_threshold)
            })
            .sum()
    }

    pub fn accepts(&self, probability: f32, loss: usize) -> bool {
        (1.0 - probability) * (loss as f32) < probability * self.risk_factor
    }
}
