use super::BeliefState;
use crate::model::card::CardId;
use crate::model::catalog::Catalog;
use crate::model::player::PlayerId;
use crate::model::PLAYER_COUNT;

#[derive(Debug, Clone)]
pub struct BeliefMetrics {
    pub entropy_per_player: [f32; PLAYER_COUNT],
    pub locked_cells: usize,
    pub groups_in_play: usize,
}

impl BeliefMetrics {
    pub fn from_state(catalog: &Catalog, state: &BeliefState) -> Self {
        let in_play: Vec<CardId> = catalog
            .cards()
            .iter()
            .filter(|card| state.is_in_play(card.half_suit))
            .map(|card| card.id)
            .collect();

        let mut entropy_per_player = [0.0; PLAYER_COUNT];
        for seat in PlayerId::LOOP {
            let mut entropy = 0.0;
            for card in &in_play {
                let prob = state.matrix().prob(seat, *card);
                if prob > 0.0 {
                    entropy -= prob * prob.ln();
                }
            }
            entropy_per_player[seat.index()] = entropy;
        }

        Self {
            entropy_per_player,
            locked_cells: state.matrix().locked_cells(),
            groups_in_play: catalog
                .half_suits()
                .iter()
                .filter(|group| state.is_in_play(group.id))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::DEFAULT_PLAYER_NAMES;

    #[test]
    fn agent_row_carries_no_entropy() {
        let catalog = Catalog::standard(&DEFAULT_PLAYER_NAMES).unwrap();
        let hand: Vec<_> = CardId::all().step_by(6).take(9).collect();
        let state = BeliefState::new(&catalog, &hand).unwrap();
        let metrics = BeliefMetrics::from_state(&catalog, &state);
        assert_eq!(metrics.entropy_per_player[0], 0.0);
        assert!(metrics.entropy_per_player[1] > 0.0);
        assert_eq!(metrics.locked_cells, 0);
        assert_eq!(metrics.groups_in_play, 9);
    }
}
