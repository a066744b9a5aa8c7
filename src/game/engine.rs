use super::{
    action::{Action, Direction},
    config::{ConfigError, GameConfig},
    state::{Board, GameOverReason, GameState, Position, Snake},
};
use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the game ended, if it did
    pub reason: Option<GameOverReason>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (agent variant)
    pub reward: i32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Score after the step
    pub score: u32,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    rng: StdRng,
    /// Episode ends once frames exceed `factor * snake length`
    frame_budget: Option<u32>,
}

impl GameEngine {
    /// Engine for keyboard play: no frame budget
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine for agent play: episodes are cut off when the snake stalls
    pub fn for_agent(config: GameConfig) -> Self {
        let budget = config.frame_budget_factor;
        Self::new(config).with_frame_budget(budget)
    }

    /// Engine with a deterministic random source
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let board = Board::from_config(&config);
        Self {
            config,
            board,
            rng,
            frame_budget: None,
        }
    }

    pub fn with_frame_budget(mut self, factor: u32) -> Self {
        self.frame_budget = Some(factor);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> Board {
        self.board
    }

    /// Reset the game to initial state
    ///
    /// Fails only for a board the starting snake fills, which
    /// [`GameConfig::validate`] rejects.
    pub fn reset(&mut self) -> Result<GameState, ConfigError> {
        let snake = Snake::new(
            self.board.center(),
            Direction::Right,
            self.config.initial_snake_length,
            self.board.block_size,
        );

        let food = self
            .place_food(&snake)
            .ok_or_else(|| ConfigError::NoRoomForFood {
                cells: self.board.cell_count(),
                length: snake.len(),
            })?;

        debug!("new game: head {:?}, food {:?}", snake.head(), food);

        Ok(GameState::new(snake, food, self.board, self.config.base_speed))
    }

    /// Resolve the heading for `action` and return the head position one block ahead.
    /// The resolved heading is written back to the snake.
    pub fn next_head(&self, state: &mut GameState, action: Action) -> Position {
        state.snake.direction = action.resolve(state.snake.direction);
        state
            .snake
            .head()
            .moved_in_direction(state.snake.direction, self.board.block_size)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult {
                reward: 0,
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    reason: None,
                },
            };
        }

        state.frame_iteration += 1;

        let new_head = self.next_head(state, action);
        state.snake.push_head(new_head);

        let reason = self
            .collision_at(state, new_head)
            .or_else(|| self.is_stalled(state).then_some(GameOverReason::Stalled));

        // The head that ended the game stays in the body
        if let Some(reason) = reason {
            return self.finish(state, reason);
        }

        if new_head == state.food {
            state.score += 1;
            state.speed += self.config.speed_increment;
            debug!("food eaten at {:?}, score {}", new_head, state.score);

            match self.place_food(&state.snake) {
                Some(food) => state.food = food,
                None => return self.finish(state, GameOverReason::BoardFull),
            }

            return StepResult {
                reward: self.config.food_reward,
                terminated: false,
                score: state.score,
                info: StepInfo {
                    ate_food: true,
                    reason: None,
                },
            };
        }

        state.snake.drop_tail();

        StepResult {
            reward: 0,
            terminated: false,
            score: state.score,
            info: StepInfo {
                ate_food: false,
                reason: None,
            },
        }
    }

    fn finish(&self, state: &mut GameState, reason: GameOverReason) -> StepResult {
        state.is_alive = false;
        info!(
            "game over ({:?}) after {} frames, score {}",
            reason, state.frame_iteration, state.score
        );

        // Filling the board still pays for the last food
        let reward = match reason {
            GameOverReason::BoardFull => self.config.food_reward,
            _ => self.config.death_penalty,
        };

        StepResult {
            reward,
            terminated: true,
            score: state.score,
            info: StepInfo {
                ate_food: reason == GameOverReason::BoardFull,
                reason: Some(reason),
            },
        }
    }

    fn is_stalled(&self, state: &GameState) -> bool {
        self.frame_budget.is_some_and(|factor| {
            state.frame_iteration as u64 > factor as u64 * state.snake.len() as u64
        })
    }

    /// Check whether `pos` is out of bounds or on the snake body (head excluded)
    pub fn collision_at(&self, state: &GameState, pos: Position) -> Option<GameOverReason> {
        if !state.is_in_bounds(pos) {
            return Some(GameOverReason::Wall);
        }

        if state.snake.collides_with_body(pos) {
            return Some(GameOverReason::SelfCollision);
        }

        None
    }

    pub fn is_collision(&self, state: &GameState, pos: Position) -> bool {
        self.collision_at(state, pos).is_some()
    }

    /// Pick a random free cell for the food.
    ///
    /// Returns `None` only when the snake covers the whole board.
    pub fn place_food(&mut self, snake: &Snake) -> Option<Position> {
        for _ in 0..self.config.max_food_attempts {
            let column = self.rng.gen_range(0..self.board.columns());
            let row = self.rng.gen_range(0..self.board.rows());
            let pos = self.board.cell(column, row);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = self
            .board
            .cells()
            .filter(|cell| !snake.occupies(*cell))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}
