//! Agent-facing environment for the Snake game
//!
//! Provides:
//! - Relative action space (straight, turn right, turn left)
//! - Integer rewards: +10 for food, -10 when the episode ends
//! - Collision probing of hypothetical points for policy features
//!
//! Learning algorithms live outside this crate.

pub mod environment;

pub use environment::{QuitRequested, SnakeGameAi, StepOutcome};
