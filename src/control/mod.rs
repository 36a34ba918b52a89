//! Control domain — the decision engine and the tracked panel position.

pub mod decision;
pub mod state;

pub use decision::{Branch, Decision, DecisionEngine, DecisionOutcome, Direction};
pub use state::TrackerState;
