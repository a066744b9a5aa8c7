//! Grid Snake - a Snake game with a keyboard loop and an agent environment
//!
//! This library provides:
//! - Core game logic (game module)
//! - Step environment for external decision makers (rl module)
//! - Scene description and terminal frontends (render module)
//! - Keyboard mapping (input module)
//! - Session and episode statistics (metrics module)
//! - Runnable modes: keyboard play and scripted autoplay (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
