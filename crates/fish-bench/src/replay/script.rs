use fish_bot::Reconciler;
use fish_core::model::PLAYER_COUNT;
use fish_core::model::call::{CallResult, CardCall, SuitCall};
use fish_core::model::catalog::Catalog;
use fish_core::model::half_suit::HalfSuit;
use fish_core::model::player::PlayerId;

use super::RunnerError;

/// Answers reconciliation queries with the counts written in the script.
#[derive(Debug, Clone)]
pub struct ScriptedReconciler {
    counts: Option<[u8; PLAYER_COUNT]>,
    requests: usize,
}

impl ScriptedReconciler {
    pub fn new(counts: Option<[u8; PLAYER_COUNT]>) -> Self {
        Self {
            counts,
            requests: 0,
        }
    }

    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl Reconciler for ScriptedReconciler {
    fn group_counts(&mut self, group: &HalfSuit) -> [u8; PLAYER_COUNT] {
        self.requests += 1;
        match self.counts {
            Some(counts) => counts,
            None => {
                tracing::warn!(
                    target: "fish_bench::replay",
                    group = %group.name,
                    "script has no counts for a missed declaration"
                );
                [0; PLAYER_COUNT]
            }
        }
    }
}

pub(super) fn player(catalog: &Catalog, name: &str) -> Result<PlayerId, RunnerError> {
    catalog
        .player_by_name(name)
        .ok_or_else(|| RunnerError::unknown("player", name))
}

pub(super) fn card_call(
    catalog: &Catalog,
    sender: &str,
    target: &str,
    card: &str,
    result: CallResult,
) -> Result<CardCall, RunnerError> {
    let card = catalog
        .card_by_name(card)
        .ok_or_else(|| RunnerError::unknown("card", card))?;
    Ok(CardCall::new(
        player(catalog, sender)?,
        player(catalog, target)?,
        card,
        result,
    ))
}

/// Declarations are made by the sender on behalf of the sender's team.
pub(super) fn suit_call(
    catalog: &Catalog,
    sender: &str,
    group: &str,
    result: CallResult,
) -> Result<SuitCall, RunnerError> {
    let sender = player(catalog, sender)?;
    let group = catalog
        .half_suit_by_name(group)
        .ok_or_else(|| RunnerError::unknown("group", group))?;
    Ok(SuitCall::new(group, catalog.team_of(sender), sender, result))
}
