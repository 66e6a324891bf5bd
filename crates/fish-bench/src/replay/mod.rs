mod script;

pub use script::ScriptedReconciler;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fish_bot::{Advisor, CandidateCall, SelectionError, Strategy};
use fish_core::error::{HandError, ObservationError};
use fish_core::game::serialization::BeliefSnapshot;
use fish_core::model::call::{MoveRecord, SuitCall};
use fish_core::model::card::CardId;
use fish_core::model::catalog::Catalog;
use fish_core::model::deck::Deck;
use fish_core::model::player::PlayerId;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ReplayConfig, ResolvedOutputs, ScriptEvent, ValidationError};

/// Drives an advisor through a scripted match.
pub struct ReplayRunner {
    config: ReplayConfig,
    outputs: ResolvedOutputs,
    catalog: Catalog,
    hand: Vec<CardId>,
    advisor_seed: u64,
}

/// Summary details returned after a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub events_processed: usize,
    pub advice_given: usize,
    pub observed_declarations: usize,
    pub automatic_declarations: usize,
    pub reconciliation_requests: usize,
    pub jsonl_path: PathBuf,
    pub snapshot_path: Option<PathBuf>,
}

struct EventOutcome {
    record: MoveRecord,
    candidate: Option<CandidateCall>,
    declared: Vec<SuitCall>,
    reconciliations: usize,
}

impl ReplayRunner {
    /// Build a runner from a validated configuration. Without a scripted hand
    /// the agent's cards are dealt from the configured seed.
    pub fn new(config: ReplayConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let catalog = config.catalog()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let deal_seed = rng.next_u64();
        let advisor_seed = rng.next_u64();

        let hand = match config.hand.as_ref() {
            Some(names) => catalog.cards_by_name(names)?,
            None => {
                let hands = Deck::shuffled_with_seed(deal_seed).deal();
                hands[PlayerId::AGENT.index()].cards().to_vec()
            }
        };

        Ok(Self {
            config,
            outputs,
            catalog,
            hand,
            advisor_seed,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn hand(&self) -> &[CardId] {
        &self.hand
    }

    /// Replays every scripted event, streaming one JSONL row per event.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut advisor = Advisor::new(
            self.catalog.clone(),
            &self.hand,
            self.config.params,
            StdRng::seed_from_u64(self.advisor_seed),
        )?;

        let mut summary = RunSummary {
            events_processed: 0,
            advice_given: 0,
            observed_declarations: 0,
            automatic_declarations: 0,
            reconciliation_requests: 0,
            jsonl_path: self.outputs.jsonl.clone(),
            snapshot_path: None,
        };

        for (index, script_event) in self.config.moves.iter().enumerate() {
            let outcome = self.apply(&mut advisor, index, script_event)?;
            match script_event {
                ScriptEvent::Advise { .. } => summary.advice_given += 1,
                ScriptEvent::Declare { .. } => summary.observed_declarations += 1,
                ScriptEvent::Call { .. } => {}
            }
            summary.automatic_declarations += outcome.declared.len();
            summary.reconciliation_requests += outcome.reconciliations;
            summary.events_processed += 1;

            let row = EventRow {
                run_id: &self.config.run_id,
                index,
                kind: script_event.kind(),
                line: outcome.record.to_line(&self.catalog),
                record: outcome.record,
                strategy: outcome.candidate.map(|candidate| candidate.strategy),
                probability: outcome.candidate.map(|candidate| candidate.probability),
                automatic_declarations: outcome
                    .declared
                    .iter()
                    .map(|call| self.catalog.half_suit(call.half_suit).name.clone())
                    .collect(),
                agent_hand_size: advisor.view().hand_size(PlayerId::AGENT),
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        if let Some(path) = self.outputs.snapshot.as_ref() {
            ensure_parent(path.parent())?;
            let json = BeliefSnapshot::to_json(&self.catalog, advisor.state())?;
            fs::write(path, json)?;
            summary.snapshot_path = Some(path.clone());
        }

        event!(
            target: "fish_bench::replay",
            Level::INFO,
            run_id = %self.config.run_id,
            events = summary.events_processed,
            advice = summary.advice_given,
            automatic_declarations = summary.automatic_declarations,
            "replay complete"
        );
        Ok(summary)
    }

    fn apply(
        &self,
        advisor: &mut Advisor<StdRng>,
        index: usize,
        script_event: &ScriptEvent,
    ) -> Result<EventOutcome, RunnerError> {
        let rejected = |source| RunnerError::Observation { index, source };
        match script_event {
            ScriptEvent::Call {
                sender,
                target,
                card,
                result,
            } => {
                let call = script::card_call(&self.catalog, sender, target, card, *result)?;
                let declared = advisor.apply_observed_call(call).map_err(rejected)?;
                Ok(EventOutcome {
                    record: call.into(),
                    candidate: None,
                    declared,
                    reconciliations: 0,
                })
            }
            ScriptEvent::Declare {
                sender,
                group,
                result,
                counts,
            } => {
                let call = script::suit_call(&self.catalog, sender, group, *result)?;
                let mut reconciler = ScriptedReconciler::new(*counts);
                let declared = advisor
                    .apply_observed_declaration(call, &mut reconciler)
                    .map_err(rejected)?;
                Ok(EventOutcome {
                    record: call.into(),
                    candidate: None,
                    declared,
                    reconciliations: reconciler.requests(),
                })
            }
            ScriptEvent::Advise { result } => {
                let candidate = advisor
                    .select_move()
                    .map_err(|source| RunnerError::Selection { index, source })?;
                let call = candidate.into_call(*result);
                let declared = advisor.apply_observed_call(call).map_err(rejected)?;
                Ok(EventOutcome {
                    record: call.into(),
                    candidate: Some(candidate),
                    declared,
                    reconciliations: 0,
                })
            }
        }
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct EventRow<'a> {
    run_id: &'a str,
    index: usize,
    kind: &'static str,
    line: String,
    record: MoveRecord,
    strategy: Option<Strategy>,
    probability: Option<f32>,
    automatic_declarations: Vec<String>,
    agent_hand_size: u8,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize output: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),
    #[error("invalid agent hand: {0}")]
    Hand(#[from] HandError),
    #[error("unknown {what} '{name}'")]
    UnknownName { what: &'static str, name: String },
    #[error("move {index} rejected: {source}")]
    Observation {
        index: usize,
        #[source]
        source: ObservationError,
    },
    #[error("move {index}: {source}")]
    Selection {
        index: usize,
        #[source]
        source: SelectionError,
    },
}

impl RunnerError {
    fn unknown(what: &'static str, name: &str) -> Self {
        RunnerError::UnknownName {
            what,
            name: name.to_string(),
        }
    }
}
