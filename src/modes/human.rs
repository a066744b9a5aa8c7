use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::info;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{FramePacer, Frontend, Scene, TerminalFrontend};

/// How a keyboard session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanOutcome {
    GameOver { score: u32 },
    /// Closed by the player before dying
    Quit,
}

/// Keyboard-driven game. There is no restart: the session ends with the game.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let mut engine = GameEngine::new(config);
        let state = engine.reset()?;

        Ok(Self {
            engine,
            state,
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        })
    }

    pub async fn run(&mut self) -> Result<HumanOutcome> {
        let mut frontend = TerminalFrontend::enter(GameMetrics::single_game())?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut frontend).await;

        frontend.leave()?;

        result
    }

    async fn run_game_loop(&mut self, frontend: &mut TerminalFrontend) -> Result<HumanOutcome> {
        let mut event_stream = EventStream::new();

        let mut speed = self.state.speed;
        let mut tick_timer = new_tick_timer(speed);

        frontend.present(&Scene::from_state(&self.state))?;

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    let result = self.update_game();

                    if result.terminated {
                        info!("keyboard game over with score {}", result.score);
                        return Ok(HumanOutcome::GameOver { score: result.score });
                    }

                    frontend.present(&Scene::from_state(&self.state))?;

                    // Eating speeds the game up
                    if self.state.speed != speed {
                        speed = self.state.speed;
                        tick_timer = new_tick_timer(speed);
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("keyboard game closed at score {}", self.state.score);
                return Ok(HumanOutcome::Quit);
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => self.pending_direction = Some(direction),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// Step once with the latest key pressed since the previous step
    fn update_game(&mut self) -> StepResult {
        let action = self
            .pending_direction
            .take()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        self.engine.step(&mut self.state, action)
    }
}

/// Interval firing `speed` times per second, first tick one period from now
fn new_tick_timer(speed: u32) -> Interval {
    let period = FramePacer::frame_duration(speed);
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
