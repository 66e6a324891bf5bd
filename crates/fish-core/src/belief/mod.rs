//! Belief tracking for card ownership.
//!
//! This module is composed of:
//! - `matrix`: per-player, per-card probability cells with a separate lock flag.
//! - `counters`: per-player half-suit knowledge (`-1` unknown, otherwise a lower bound).
//! - `public`: what the whole table could plausibly infer about the agent's cards.
//! - `state`: the cohesive belief state and the update rules that keep it consistent.
//! - `telemetry`: summary metrics for logging.

mod counters;
mod matrix;
mod public;
mod state;
pub mod telemetry;

pub use counters::{HalfSuitCounters, UNKNOWN_COUNT};
pub use matrix::{BeliefCell, BeliefMatrix, Redistribution};
pub use public::{PUBLIC_PRIOR, PublicPerception};
pub use state::BeliefState;

/// Slack used when comparing a probability against certainty.
pub const CERTAINTY_EPSILON: f32 = 1e-6;
