use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    pub fn next(&self, direction: Direction) -> Self {
        Self::new(
            self.row + direction.shift_row(),
            self.column + direction.shift_column(),
        )
    }

    pub fn previous(&self, direction: Direction) -> Self {
        Self::new(
            self.row - direction.shift_row(),
            self.column - direction.shift_column(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    pub fn shift_row(&self) -> i32 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
            Direction::Left | Direction::Right => 0,
        }
    }

    pub fn shift_column(&self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up | Direction::Down => 0,
        }
    }

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.reverse() == *other
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Snake,
    Food,
    /// Answer for positions beyond the board; never stored.
    Outside,
}

/// What a single tick did to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Ate,
    Died(DeathReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    InvalidState(&'static str),
    InvalidSettings(String),
    GameOver,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidState(what) => write!(f, "invalid snake state: {}", what),
            GameError::InvalidSettings(reason) => write!(f, "invalid snake settings: {}", reason),
            GameError::GameOver => write!(f, "the game is over, reinitialize to play again"),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_shifts() {
        assert_eq!((Direction::Left.shift_row(), Direction::Left.shift_column()), (0, -1));
        assert_eq!((Direction::Up.shift_row(), Direction::Up.shift_column()), (-1, 0));
        assert_eq!((Direction::Right.shift_row(), Direction::Right.shift_column()), (0, 1));
        assert_eq!((Direction::Down.shift_row(), Direction::Down.shift_column()), (1, 0));
    }

    #[test]
    fn test_reverse_negates_both_shifts() {
        for direction in Direction::ALL {
            let reversed = direction.reverse();
            assert_eq!(reversed.shift_row(), -direction.shift_row());
            assert_eq!(reversed.shift_column(), -direction.shift_column());
            assert!(direction.is_opposite(&reversed));
            assert!(!direction.is_opposite(&direction));
        }
    }

    #[test]
    fn test_next_and_previous_are_inverse() {
        let position = Position::new(7, 3);
        assert_eq!(position.next(Direction::Right), Position::new(7, 4));
        assert_eq!(position.next(Direction::Up), Position::new(6, 3));
        for direction in Direction::ALL {
            assert_eq!(position.next(direction).previous(direction), position);
        }
    }
}
