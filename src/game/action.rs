use thiserror::Error;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// All directions in clockwise order, starting from Right
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Next direction in the clockwise cycle (a right turn)
    pub fn clockwise(self) -> Direction {
        match self {
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
        }
    }

    /// Previous direction in the clockwise cycle (a left turn)
    pub fn counter_clockwise(self) -> Direction {
        match self {
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
        }
    }

    /// Returns the pixel delta (dx, dy) for one block of movement.
    /// Screen coordinates: y grows downwards.
    pub fn delta(self, block_size: i32) -> (i32, i32) {
        match self {
            Direction::Right => (block_size, 0),
            Direction::Down => (0, block_size),
            Direction::Left => (-block_size, 0),
            Direction::Up => (0, -block_size),
        }
    }
}

/// Heading change relative to the current direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Straight,
    Right,
    Left,
}

impl Turn {
    pub fn apply(self, direction: Direction) -> Direction {
        match self {
            Turn::Straight => direction,
            Turn::Right => direction.clockwise(),
            Turn::Left => direction.counter_clockwise(),
        }
    }

    /// One-hot encoding `[straight, right, left]`
    pub fn to_one_hot(self) -> [u8; 3] {
        match self {
            Turn::Straight => [1, 0, 0],
            Turn::Right => [0, 1, 0],
            Turn::Left => [0, 0, 1],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("action must be one-hot over [straight, right, left], got {0:?}")]
    NotOneHot([u8; 3]),
}

impl TryFrom<[u8; 3]> for Turn {
    type Error = ActionError;

    fn try_from(one_hot: [u8; 3]) -> Result<Self, Self::Error> {
        match one_hot {
            [1, 0, 0] => Ok(Turn::Straight),
            [0, 1, 0] => Ok(Turn::Right),
            [0, 0, 1] => Ok(Turn::Left),
            other => Err(ActionError::NotOneHot(other)),
        }
    }
}

/// Input for a single engine step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Replace the heading outright (keyboard play)
    Move(Direction),
    /// Turn relative to the current heading (agent play)
    Turn(Turn),
    /// Keep the current heading
    Continue,
}

impl Action {
    /// Resolve the heading this action produces from `current`
    pub fn resolve(self, current: Direction) -> Direction {
        match self {
            Action::Move(direction) => direction,
            Action::Turn(turn) => turn.apply(current),
            Action::Continue => current,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

impl From<Turn> for Action {
    fn from(turn: Turn) -> Self {
        Action::Turn(turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clockwise_cycle() {
        assert_eq!(Direction::Right.clockwise(), Direction::Down);
        assert_eq!(Direction::Down.clockwise(), Direction::Left);
        assert_eq!(Direction::Left.clockwise(), Direction::Up);
        assert_eq!(Direction::Up.clockwise(), Direction::Right);

        for (i, dir) in Direction::CLOCKWISE.iter().enumerate() {
            assert_eq!(dir.clockwise(), Direction::CLOCKWISE[(i + 1) % 4]);
            assert_eq!(dir.counter_clockwise(), Direction::CLOCKWISE[(i + 3) % 4]);
        }
    }

    #[test]
    fn test_three_rights_make_a_left() {
        for dir in Direction::CLOCKWISE {
            let three_rights = Turn::Right.apply(Turn::Right.apply(Turn::Right.apply(dir)));
            assert_eq!(three_rights, Turn::Left.apply(dir));
        }
    }

    #[test]
    fn test_turns_are_inverse() {
        for dir in Direction::CLOCKWISE {
            assert_eq!(dir.clockwise().counter_clockwise(), dir);
            assert_eq!(Turn::Straight.apply(dir), dir);
        }
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(20), (0, -20));
        assert_eq!(Direction::Down.delta(20), (0, 20));
        assert_eq!(Direction::Left.delta(20), (-20, 0));
        assert_eq!(Direction::Right.delta(20), (20, 0));
    }

    #[test]
    fn test_one_hot_parsing() {
        assert_eq!(Turn::try_from([1, 0, 0]), Ok(Turn::Straight));
        assert_eq!(Turn::try_from([0, 1, 0]), Ok(Turn::Right));
        assert_eq!(Turn::try_from([0, 0, 1]), Ok(Turn::Left));
        assert_eq!(
            Turn::try_from([1, 1, 0]),
            Err(ActionError::NotOneHot([1, 1, 0]))
        );
        assert!(Turn::try_from([0, 0, 0]).is_err());

        for turn in [Turn::Straight, Turn::Right, Turn::Left] {
            assert_eq!(Turn::try_from(turn.to_one_hot()), Ok(turn));
        }
    }

    #[test]
    fn test_action_resolution() {
        // Keyboard moves are not filtered, reversing is allowed
        assert_eq!(Action::Move(Direction::Left).resolve(Direction::Right), Direction::Left);
        assert_eq!(Action::Continue.resolve(Direction::Up), Direction::Up);
        assert_eq!(Action::Turn(Turn::Right).resolve(Direction::Up), Direction::Right);
        assert_eq!(Action::Turn(Turn::Left).resolve(Direction::Right), Direction::Up);
    }
}
