use super::types::DeathReason;

/// Optional observer for presentation code that prefers callbacks over inspecting
/// the `MoveOutcome` returned by each tick.
pub trait GameEventListener: Send {
    fn on_eat_food(&mut self, _score: u32) {}

    fn on_game_over(&mut self, _reason: DeathReason, _final_score: u32) {}
}
