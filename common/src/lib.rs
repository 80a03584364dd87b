pub mod config;
pub mod games;
pub mod logger;

pub use games::SessionRng;
pub use games::snake::{
    CellState, DeathReason, Direction, GameError, GameEventListener, MoveOutcome, Position,
    SnakeGameState, SnakeSegment, SnakeSettings,
};
