pub mod bot;
pub mod ports;

pub use bot::{
    Advisor, BeliefView, BotParams, CandidateCall, CostBenefitGate, MoveSelector, SelectionError,
    Strategy,
};
pub use ports::Reconciler;
