pub mod autoplay;
pub mod human;

pub use autoplay::{AutoplayConfig, AutoplayMode, GreedyPilot};
pub use human::{HumanMode, HumanOutcome};
