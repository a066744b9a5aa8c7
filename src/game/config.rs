use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Reasons a configuration cannot be used to build a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("block_size must be positive, got {0}")]
    InvalidBlockSize(i32),
    #[error("{axis} ({value}) must be a positive multiple of block_size ({block_size})")]
    MisalignedDimension {
        axis: &'static str,
        value: i32,
        block_size: i32,
    },
    #[error("initial_snake_length must be at least 1")]
    EmptySnake,
    #[error("board is {columns} cells wide, too narrow for a snake of length {length}")]
    SnakeDoesNotFit { columns: i32, length: usize },
    #[error("board has {cells} cells, no room for food next to a snake of length {length}")]
    NoRoomForFood { cells: usize, length: usize },
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Configuration for the game
///
/// Dimensions are in pixels and must be multiples of `block_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in pixels
    pub width: i32,
    /// Board height in pixels
    pub height: i32,
    /// Edge length of one grid cell in pixels
    pub block_size: i32,
    /// Ticks per second at the start of a game
    pub base_speed: u32,
    /// Added to the speed every time food is eaten
    pub speed_increment: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Rewards (agent variant)
    /// Reward for eating food
    pub food_reward: i32,
    /// Reward when the episode ends
    pub death_penalty: i32,
    /// An agent episode ends once frames exceed this factor times the snake length
    pub frame_budget_factor: u32,

    /// Random draws before food placement falls back to scanning free cells
    pub max_food_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            block_size: 20,
            base_speed: 10,
            speed_increment: 2,
            initial_snake_length: 3,
            food_reward: 10,
            death_penalty: -10,
            frame_budget_factor: 100,
            max_food_attempts: 64,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size in pixels
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    ///
    /// The result is not validated, so callers can still override fields first.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Number of grid columns
    pub fn columns(&self) -> i32 {
        self.width / self.block_size
    }

    /// Number of grid rows
    pub fn rows(&self) -> i32 {
        self.height / self.block_size
    }

    /// Check that the board can host a game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size <= 0 {
            return Err(ConfigError::InvalidBlockSize(self.block_size));
        }

        for (axis, value) in [("width", self.width), ("height", self.height)] {
            if value <= 0 || value % self.block_size != 0 {
                return Err(ConfigError::MisalignedDimension {
                    axis,
                    value,
                    block_size: self.block_size,
                });
            }
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        // The starting snake lies horizontally from the center towards the left edge
        let head_column = self.columns() / 2;
        if self.initial_snake_length as i64 > head_column as i64 + 1 {
            return Err(ConfigError::SnakeDoesNotFit {
                columns: self.columns(),
                length: self.initial_snake_length,
            });
        }

        let cells = self.columns() as usize * self.rows() as usize;
        if cells <= self.initial_snake_length {
            return Err(ConfigError::NoRoomForFood {
                cells,
                length: self.initial_snake_length,
            });
        }

        if self.base_speed == 0 {
            return Err(ConfigError::Zero("base_speed"));
        }
        if self.frame_budget_factor == 0 {
            return Err(ConfigError::Zero("frame_budget_factor"));
        }
        if self.max_food_attempts == 0 {
            return Err(ConfigError::Zero("max_food_attempts"));
        }

        Ok(())
    }
}
