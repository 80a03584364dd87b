use eframe::egui;
use snake_common::{DeathReason, Direction, GameEventListener, SnakeGameState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    StartNewGame,
    ChangeDirection(Direction),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Waiting,
    Countdown(u8),
    Running,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub reason: DeathReason,
    pub score: u32,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between the egui thread and the session task. The game itself sits behind
/// one mutex so turns and ticks never interleave.
#[derive(Clone)]
pub struct SharedState {
    game: Arc<Mutex<SnakeGameState>>,
    phase: Arc<Mutex<SessionPhase>>,
    last_result: Arc<Mutex<Option<GameResult>>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new(mut game: SnakeGameState) -> Self {
        let last_result = Arc::new(Mutex::new(None));
        game.add_listener(Box::new(ResultRecorder {
            last_result: Arc::clone(&last_result),
        }));

        Self {
            game: Arc::new(Mutex::new(game)),
            phase: Arc::new(Mutex::new(SessionPhase::Waiting)),
            last_result,
            context: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_game<R>(&self, f: impl FnOnce(&mut SnakeGameState) -> R) -> R {
        f(&mut lock(&self.game))
    }

    pub fn phase(&self) -> SessionPhase {
        *lock(&self.phase)
    }

    pub fn set_phase(&self, phase: SessionPhase) {
        *lock(&self.phase) = phase;
        self.request_repaint();
    }

    pub fn last_result(&self) -> Option<GameResult> {
        *lock(&self.last_result)
    }

    pub fn has_context(&self) -> bool {
        lock(&self.context).is_some()
    }

    pub fn set_context(&self, ctx: egui::Context) {
        *lock(&self.context) = Some(ctx);
    }

    pub fn request_repaint(&self) {
        if let Some(ctx) = lock(&self.context).as_ref() {
            ctx.request_repaint();
        }
    }
}

struct ResultRecorder {
    last_result: Arc<Mutex<Option<GameResult>>>,
}

impl GameEventListener for ResultRecorder {
    fn on_game_over(&mut self, reason: DeathReason, final_score: u32) {
        *lock(&self.last_result) = Some(GameResult {
            reason,
            score: final_score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::{SessionRng, SnakeSettings};

    #[test]
    fn test_game_over_is_recorded_as_last_result() {
        let game = SnakeGameState::new(&SnakeSettings::default(), SessionRng::new(11)).unwrap();
        let shared_state = SharedState::new(game);
        assert_eq!(shared_state.last_result(), None);

        // Heading up from the middle row hits the top wall after eight ticks at most.
        shared_state.with_game(|game| game.change_direction(Direction::Up));
        while !shared_state.with_game(|game| game.is_game_over()) {
            shared_state.with_game(|game| game.move_snake()).unwrap();
        }

        let result = shared_state.last_result().unwrap();
        assert_eq!(result.reason, DeathReason::WallCollision);
        assert_eq!(result.score, shared_state.with_game(|game| game.score()));
    }

    #[test]
    fn test_phase_starts_waiting() {
        let game = SnakeGameState::new(&SnakeSettings::default(), SessionRng::new(1)).unwrap();
        let shared_state = SharedState::new(game);
        assert_eq!(shared_state.phase(), SessionPhase::Waiting);
        shared_state.set_phase(SessionPhase::Countdown(3));
        assert_eq!(shared_state.phase(), SessionPhase::Countdown(3));
    }
}
