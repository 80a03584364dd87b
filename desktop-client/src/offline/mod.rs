mod session_runner;

pub use session_runner::{SessionTimings, local_game_task};
