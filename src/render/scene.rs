//! Primitive draw commands produced once per tick
//!
//! The core never talks to a drawing library. It describes a frame as a list of
//! filled rectangles and text in board pixel coordinates, and a frontend turns
//! that into whatever its backend understands.

use crate::game::GameState;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const RED: Rgb = Rgb(200, 0, 0);
pub const BLUE1: Rgb = Rgb(0, 0, 255);
pub const BLUE2: Rgb = Rgb(0, 100, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// Clear the whole board
    Fill(Rgb),
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgb,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Rgb,
    },
}

/// One frame worth of draw commands, in painting order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub width: i32,
    pub height: i32,
    pub block_size: i32,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Describe the current game: background, snake, food, then the score
    pub fn from_state(state: &GameState) -> Self {
        let block = state.board.block_size;
        let inset = block / 5;
        let inner = block - 2 * inset;

        let mut commands = Vec::with_capacity(state.snake.len() * 2 + 3);
        commands.push(DrawCommand::Fill(BLACK));

        for segment in &state.snake.body {
            commands.push(DrawCommand::Rect {
                x: segment.x,
                y: segment.y,
                width: block,
                height: block,
                color: BLUE1,
            });
            commands.push(DrawCommand::Rect {
                x: segment.x + inset,
                y: segment.y + inset,
                width: inner,
                height: inner,
                color: BLUE2,
            });
        }

        commands.push(DrawCommand::Rect {
            x: state.food.x,
            y: state.food.y,
            width: block,
            height: block,
            color: RED,
        });

        commands.push(DrawCommand::Text {
            x: 0,
            y: 0,
            text: format!("Score: {}", state.score),
            color: WHITE,
        });

        Self {
            width: state.board.width,
            height: state.board.height,
            block_size: block,
            commands,
        }
    }

    /// Text commands in painting order
    pub fn texts(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, color, .. } => Some((text.as_str(), *color)),
            _ => None,
        })
    }
}
