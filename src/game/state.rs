use std::collections::VecDeque;

use super::action::Direction;
use super::config::GameConfig;

/// A pixel position on the board, aligned to the block grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one block in a direction
    pub fn moved_in_direction(&self, direction: Direction, block_size: i32) -> Self {
        let (dx, dy) = direction.delta(block_size);
        self.moved_by(dx, dy)
    }
}

/// Board geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub block_size: i32,
}

impl Board {
    pub fn new(width: i32, height: i32, block_size: i32) -> Self {
        Self {
            width,
            height,
            block_size,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.width, config.height, config.block_size)
    }

    pub fn columns(&self) -> i32 {
        (self.width - self.block_size) / self.block_size + 1
    }

    pub fn rows(&self) -> i32 {
        (self.height - self.block_size) / self.block_size + 1
    }

    pub fn cell_count(&self) -> usize {
        (self.columns().max(0) as usize) * (self.rows().max(0) as usize)
    }

    /// Check if a position lies inside `[0, dimension - block_size]` on both axes
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x <= self.width - self.block_size
            && pos.y >= 0
            && pos.y <= self.height - self.block_size
    }

    /// Top-left position of the cell at (column, row)
    pub fn cell(&self, column: i32, row: i32) -> Position {
        Position::new(column * self.block_size, row * self.block_size)
    }

    /// Grid-aligned center of the board
    pub fn center(&self) -> Position {
        self.cell(self.width / self.block_size / 2, self.height / self.block_size / 2)
    }

    /// Every cell on the board, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows()).flat_map(move |row| (0..self.columns()).map(move |col| self.cell(col, row)))
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction.
    /// Segments trail behind the head, one block apart.
    pub fn new(head: Position, direction: Direction, length: usize, block_size: i32) -> Self {
        let (dx, dy) = direction.delta(block_size);
        let body = std::iter::successors(Some(head), |prev| Some(prev.moved_by(-dx, -dy)))
            .take(length.max(1))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Self {
        Self {
            body: segments.into_iter().collect(),
            direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter().skip(1)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().any(|&segment| segment == pos)
    }

    /// Check if any segment, head included, occupies the position
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    pub fn drop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Snake left the board
    Wall,
    /// Snake ran into itself
    SelfCollision,
    /// Frame budget ran out without a collision
    Stalled,
    /// No free cell left for food
    BoardFull,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub board: Board,
    pub score: u32,
    /// Ticks per second
    pub speed: u32,
    /// Steps taken since the last reset
    pub frame_iteration: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, board: Board, speed: u32) -> Self {
        Self {
            snake,
            food,
            board,
            score: 0,
            speed,
            frame_iteration: 0,
            is_alive: true,
        }
    }

    /// Check if a position is within the board bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.board.is_in_bounds(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(640, 480, 20)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(100, 100);
        assert_eq!(pos.moved_in_direction(Direction::Right, 20), Position::new(120, 100));
        assert_eq!(pos.moved_in_direction(Direction::Left, 20), Position::new(80, 100));
        assert_eq!(pos.moved_in_direction(Direction::Down, 20), Position::new(100, 120));
        assert_eq!(pos.moved_in_direction(Direction::Up, 20), Position::new(100, 80));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(320, 240), Direction::Right, 3, 20);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(320, 240));
        assert_eq!(snake.body[1], Position::new(300, 240));
        assert_eq!(snake.tail(), Position::new(280, 240));
    }

    #[test]
    fn test_snake_segments_are_contiguous() {
        let snake = Snake::new(Position::new(200, 200), Direction::Up, 5, 20);
        let segments: Vec<_> = snake.body.iter().collect();
        for pair in segments.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let distance = (a.x - b.x).abs() + (a.y - b.y).abs();
            assert_eq!(distance, 20);
        }
    }

    #[test]
    fn test_push_and_drop() {
        let mut snake = Snake::new(Position::new(320, 240), Direction::Right, 3, 20);
        snake.push_head(Position::new(340, 240));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.drop_tail(), Some(Position::new(280, 240)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(340, 240));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(320, 240), Direction::Right, 3, 20);
        assert!(!snake.collides_with_body(Position::new(320, 240))); // head
        assert!(snake.collides_with_body(Position::new(300, 240))); // body
        assert!(!snake.collides_with_body(Position::new(0, 0))); // empty
        assert!(snake.occupies(Position::new(320, 240)));
    }

    #[test]
    fn test_bounds_checking() {
        let board = board();
        assert!(board.is_in_bounds(Position::new(0, 0)));
        assert!(board.is_in_bounds(Position::new(620, 460)));
        assert!(!board.is_in_bounds(Position::new(-20, 0)));
        assert!(!board.is_in_bounds(Position::new(640, 0)));
        assert!(!board.is_in_bounds(Position::new(0, 480)));
        assert!(!board.is_in_bounds(Position::new(0, -20)));
    }

    #[test]
    fn test_board_cells() {
        let board = board();
        assert_eq!(board.columns(), 32);
        assert_eq!(board.rows(), 24);
        assert_eq!(board.cell_count(), 32 * 24);
        assert_eq!(board.cells().count(), board.cell_count());
        assert!(board.cells().all(|cell| board.is_in_bounds(cell)));
        assert_eq!(board.center(), Position::new(320, 240));
    }
}
