mod advisor;
mod belief;
mod gate;
mod params;
mod select;

pub use advisor::Advisor;
pub use belief::BeliefView;
pub use gate::CostBenefitGate;
pub use params::BotParams;
pub use select::{CandidateCall, MoveSelector, SelectionError, Strategy};
