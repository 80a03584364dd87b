mod board;
mod events;
mod food;
mod game_state;
mod settings;
mod snake;
mod types;

pub use board::Board;
pub use events::GameEventListener;
pub use food::Food;
pub use game_state::{SnakeGameState, format_speed};
pub use settings::SnakeSettings;
pub use snake::{INITIAL_LENGTH, MAX_PENDING_DIRECTIONS, Snake, SnakeSegment};
pub use types::{CellState, DeathReason, Direction, GameError, MoveOutcome, Position};
