//! Terminal presentation of the game
//!
//! The simulation emits a [`Scene`]; frontends decide how it reaches the screen.

pub mod frontend;
pub mod renderer;
pub mod scene;

pub use frontend::{FramePacer, Frontend, FrontendSignal, Headless, TerminalFrontend};
pub use renderer::Renderer;
pub use scene::{DrawCommand, Rgb, Scene};
