//! Scripted play of the agent environment
//!
//! Drives [`SnakeGameAi`] with a greedy pilot that probes collisions one block
//! ahead and steers towards the food. Episodes restart with `reset` until the
//! requested count is reached, either in the terminal or headless.
//!
//! The pilot is a fixed heuristic, not a learner.

use anyhow::Result;
use log::info;

use crate::game::{GameConfig, Turn};
use crate::metrics::{EpisodeRecord, EpisodeStats, GameMetrics};
use crate::render::{Frontend, Headless, TerminalFrontend};
use crate::rl::SnakeGameAi;

/// Picks the safe turn that gets closest to the food
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPilot;

impl GreedyPilot {
    pub fn choose<F: Frontend>(&self, env: &SnakeGameAi<F>) -> Turn {
        let state = env.state();
        let head = state.snake.head();
        let food = state.food;

        [Turn::Straight, Turn::Right, Turn::Left]
            .into_iter()
            .map(|turn| {
                let heading = turn.apply(state.snake.direction);
                (turn, head.moved_in_direction(heading, state.board.block_size))
            })
            .filter(|(_, next)| !env.is_collision(Some(*next)))
            // min_by_key keeps the first of equal candidates, so straight wins ties
            .min_by_key(|(_, next)| (next.x - food.x).abs() + (next.y - food.y).abs())
            .map(|(turn, _)| turn)
            .unwrap_or(Turn::Straight)
    }
}

/// Autoplay settings
#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    pub game_config: GameConfig,
    /// Episodes to play
    pub episodes: usize,
    pub seed: Option<u64>,
}

pub struct AutoplayMode {
    config: AutoplayConfig,
    pilot: GreedyPilot,
}

impl AutoplayMode {
    pub fn new(config: AutoplayConfig) -> Self {
        Self {
            config,
            pilot: GreedyPilot,
        }
    }

    /// Play every episode as fast as possible without a screen
    pub fn run_headless(&self) -> Result<EpisodeStats> {
        let mut env = self.environment(Headless)?;
        let mut stats = EpisodeStats::new(100);
        self.play_episodes(&mut env, &mut stats, |_, _| {})?;
        Ok(stats)
    }

    /// Play in the terminal at game speed. Blocks the calling thread.
    pub fn run_in_terminal(&self) -> Result<EpisodeStats> {
        // Reject a bad board before the terminal switches to raw mode
        self.config.game_config.validate()?;
        let mut env = self.environment(TerminalFrontend::enter(GameMetrics::episodes())?)?;

        let mut stats = EpisodeStats::new(100);
        let result = self.play_episodes(&mut env, &mut stats, |env, record| {
            env.frontend_mut().metrics_mut().finish_episode(record.score);
        });

        env.frontend_mut().leave()?;

        result.map(|_| stats)
    }

    fn environment<F: Frontend>(&self, frontend: F) -> Result<SnakeGameAi<F>> {
        let game_config = self.config.game_config.clone();
        match self.config.seed {
            Some(seed) => SnakeGameAi::with_seed(game_config, frontend, seed),
            None => SnakeGameAi::new(game_config, frontend),
        }
    }

    fn play_episodes<F: Frontend>(
        &self,
        env: &mut SnakeGameAi<F>,
        stats: &mut EpisodeStats,
        mut on_episode: impl FnMut(&mut SnakeGameAi<F>, &EpisodeRecord),
    ) -> Result<()> {
        for episode in 0..self.config.episodes {
            env.reset()?;
            let mut reward = 0i64;

            loop {
                let turn = self.pilot.choose(env);
                let outcome = env.play_step(turn)?;
                reward += outcome.reward as i64;

                if outcome.game_over {
                    let record = EpisodeRecord {
                        reward,
                        frames: env.state().frame_iteration,
                        score: outcome.score,
                    };
                    info!(
                        "episode {} finished: score {}, {} frames",
                        episode + 1,
                        record.score,
                        record.frames
                    );
                    stats.record(record);
                    on_episode(env, &record);
                    break;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position, Snake};

    fn autoplay(episodes: usize) -> AutoplayMode {
        AutoplayMode::new(AutoplayConfig {
            game_config: GameConfig::small(),
            episodes,
            seed: Some(2024),
        })
    }

    fn env() -> SnakeGameAi<Headless> {
        SnakeGameAi::with_seed(GameConfig::default(), Headless, 1).unwrap()
    }

    #[test]
    fn test_pilot_heads_for_food() {
        let mut env = env();
        // Head at (320, 240) facing right, food straight below
        env.state_mut().food = Position::new(320, 400);

        assert_eq!(GreedyPilot.choose(&env), Turn::Right);
    }

    #[test]
    fn test_pilot_prefers_straight_on_ties() {
        let mut env = env();
        // Straight and right both end up one block from the food
        env.state_mut().food = Position::new(340, 260);

        assert_eq!(GreedyPilot.choose(&env), Turn::Straight);
    }

    #[test]
    fn test_pilot_avoids_walls() {
        let mut env = env();
        env.state_mut().snake = Snake::new(Position::new(620, 100), Direction::Right, 3, 20);
        env.state_mut().food = Position::new(0, 0);

        assert_eq!(GreedyPilot.choose(&env), Turn::Left);
    }

    #[test]
    fn test_pilot_falls_back_to_straight_when_trapped() {
        let mut env = env();
        env.state_mut().snake = Snake::from_segments(
            [
                Position::new(0, 0),
                Position::new(0, 20),
                Position::new(20, 20),
                Position::new(20, 0),
                Position::new(40, 0),
            ],
            Direction::Left,
        );

        // Ahead and to the right are walls, to the left is the body
        assert_eq!(GreedyPilot.choose(&env), Turn::Straight);
    }

    #[test]
    fn test_headless_run_plays_every_episode() {
        let stats = autoplay(3).run_headless().unwrap();

        assert_eq!(stats.total_episodes(), 3);
        assert!(stats.total_frames() >= 3);
        assert!(stats.mean_reward() <= stats.mean_score() * 10.0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let first = autoplay(2).run_headless().unwrap();
        let second = autoplay(2).run_headless().unwrap();

        assert_eq!(first.total_frames(), second.total_frames());
        assert_eq!(first.best_score(), second.best_score());
    }
}
