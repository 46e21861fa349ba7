//! Hint search
//!
//! Chooses which rank to reveal next when the player asks for a hint.

mod planner;

pub use planner::{HintPlan, HintPlanner, SearchDirection};
