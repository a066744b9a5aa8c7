//! Injected presentation collaborators
//!
//! A [`Frontend`] drains pending input, presents a [`Scene`] and paces frames.
//! The simulation only ever sees this trait, so it runs the same way in a
//! terminal and in tests.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};

use super::renderer::Renderer;
use super::scene::Scene;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;

/// Outcome of draining the frontend's event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendSignal {
    Continue,
    Quit,
}

pub trait Frontend {
    /// Drain pending input without blocking
    fn pump_events(&mut self) -> Result<FrontendSignal>;

    /// Show one frame
    fn present(&mut self, scene: &Scene) -> Result<()>;

    /// Block until the next frame is due at `speed` frames per second
    fn pace(&mut self, speed: u32);
}

/// Frontend that draws nothing and never waits
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Frontend for Headless {
    fn pump_events(&mut self) -> Result<FrontendSignal> {
        Ok(FrontendSignal::Continue)
    }

    fn present(&mut self, _scene: &Scene) -> Result<()> {
        Ok(())
    }

    fn pace(&mut self, _speed: u32) {}
}

/// Fixed-rate frame limiter
///
/// Sleeps away whatever is left of the current frame, measured from the end of
/// the previous `tick`.
#[derive(Debug, Default)]
pub struct FramePacer {
    last_tick: Option<Instant>,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of one frame at `speed` frames per second
    pub fn frame_duration(speed: u32) -> Duration {
        Duration::from_secs(1) / speed.max(1)
    }

    /// Time left to sleep if the previous frame ended `elapsed` ago
    pub fn remaining(speed: u32, elapsed: Duration) -> Duration {
        Self::frame_duration(speed).saturating_sub(elapsed)
    }

    pub fn tick(&mut self, speed: u32) {
        if let Some(last) = self.last_tick {
            let remaining = Self::remaining(speed, last.elapsed());
            if !remaining.is_zero() {
                std::thread::sleep(remaining);
            }
        }
        self.last_tick = Some(Instant::now());
    }
}

/// Terminal frontend backed by ratatui and crossterm
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    input_handler: InputHandler,
    metrics: GameMetrics,
    pacer: FramePacer,
}

impl TerminalFrontend {
    /// Switch the terminal to raw mode and the alternate screen
    pub fn enter(metrics: GameMetrics) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        Ok(Self {
            terminal,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            metrics,
            pacer: FramePacer::new(),
        })
    }

    pub fn metrics_mut(&mut self) -> &mut GameMetrics {
        &mut self.metrics
    }

    /// Give the terminal back to the shell
    pub fn leave(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

impl Frontend for TerminalFrontend {
    fn pump_events(&mut self) -> Result<FrontendSignal> {
        while event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                if key.kind == KeyEventKind::Press
                    && self.input_handler.handle_key_event(key) == KeyAction::Quit
                {
                    return Ok(FrontendSignal::Quit);
                }
            }
        }
        Ok(FrontendSignal::Continue)
    }

    fn present(&mut self, scene: &Scene) -> Result<()> {
        self.metrics.tick();
        let renderer = &self.renderer;
        let metrics = &self.metrics;
        self.terminal
            .draw(|frame| renderer.render(frame, scene, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn pace(&mut self, speed: u32) {
        self.pacer.tick(speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        assert_eq!(FramePacer::frame_duration(10), Duration::from_millis(100));
        assert_eq!(FramePacer::frame_duration(20), Duration::from_millis(50));
        // Zero speed is clamped rather than dividing by zero
        assert_eq!(FramePacer::frame_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_remaining_time() {
        assert_eq!(
            FramePacer::remaining(10, Duration::from_millis(30)),
            Duration::from_millis(70)
        );
        assert_eq!(
            FramePacer::remaining(10, Duration::from_millis(150)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_first_tick_does_not_sleep() {
        let mut pacer = FramePacer::new();
        let start = Instant::now();
        pacer.tick(1);
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_headless_is_inert() {
        let mut frontend = Headless;
        assert_eq!(frontend.pump_events().unwrap(), FrontendSignal::Continue);
        frontend.pace(1);
    }
}
