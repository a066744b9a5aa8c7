use anyhow::Result;
use log::debug;
use thiserror::Error;

use crate::game::{Action, GameConfig, GameEngine, GameState, Position, Turn};
use crate::render::{Frontend, FrontendSignal, Headless, Scene};

/// Raised by [`SnakeGameAi::play_step`] when the frontend asks to close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("quit requested by the frontend")]
pub struct QuitRequested;

/// What a caller gets back from one agent step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub reward: i32,
    pub game_over: bool,
    pub score: u32,
}

impl From<StepOutcome> for (i32, bool, u32) {
    fn from(outcome: StepOutcome) -> Self {
        (outcome.reward, outcome.game_over, outcome.score)
    }
}

/// Snake environment driven by relative actions
///
/// Each [`play_step`](Self::play_step) is one tick: drain frontend input,
/// advance the simulation, and on a non-terminal step draw the frame and wait
/// for the frame pacer. Episodes end on a collision or when the snake wanders
/// for more than `frame_budget_factor` frames per segment without dying.
///
/// Unlike the keyboard game, a finished episode can be restarted with
/// [`reset`](Self::reset).
pub struct SnakeGameAi<F: Frontend = Headless> {
    engine: GameEngine,
    state: GameState,
    frontend: F,
}

impl SnakeGameAi<Headless> {
    /// Environment that never draws or waits
    pub fn headless(config: GameConfig) -> Result<Self> {
        Self::new(config, Headless)
    }
}

impl<F: Frontend> SnakeGameAi<F> {
    pub fn new(config: GameConfig, frontend: F) -> Result<Self> {
        config.validate()?;
        Self::from_engine(GameEngine::for_agent(config), frontend)
    }

    /// Environment with reproducible food placement
    pub fn with_seed(config: GameConfig, frontend: F, seed: u64) -> Result<Self> {
        config.validate()?;
        let budget = config.frame_budget_factor;
        let engine = GameEngine::with_seed(config, seed).with_frame_budget(budget);
        Self::from_engine(engine, frontend)
    }

    fn from_engine(mut engine: GameEngine, frontend: F) -> Result<Self> {
        let state = engine.reset()?;
        Ok(Self {
            engine,
            state,
            frontend,
        })
    }

    /// Start a new episode
    pub fn reset(&mut self) -> Result<()> {
        self.state = self.engine.reset()?;
        debug!("episode reset, food at {:?}", self.state.food);
        Ok(())
    }

    /// Advance one tick with a relative action
    pub fn play_step(&mut self, turn: Turn) -> Result<StepOutcome> {
        if self.frontend.pump_events()? == FrontendSignal::Quit {
            return Err(QuitRequested.into());
        }

        let result = self.engine.step(&mut self.state, Action::Turn(turn));

        if !result.terminated {
            self.frontend.present(&Scene::from_state(&self.state))?;
            self.frontend.pace(self.state.speed);
        }

        Ok(StepOutcome {
            reward: result.reward,
            game_over: result.terminated,
            score: result.score,
        })
    }

    /// Advance one tick with a one-hot `[straight, right, left]` action
    pub fn play_step_one_hot(&mut self, action: [u8; 3]) -> Result<StepOutcome> {
        let turn = Turn::try_from(action)?;
        self.play_step(turn)
    }

    /// Would the snake die at `point`? Defaults to the current head.
    pub fn is_collision(&self, point: Option<Position>) -> bool {
        let point = point.unwrap_or_else(|| self.state.snake.head());
        self.engine.is_collision(&self.state, point)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for setting up scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }
}
