use std::time::Duration;

use crate::config::Validate;
use crate::games::SessionRng;
use crate::log;

use super::board::Board;
use super::events::GameEventListener;
use super::food::Food;
use super::settings::SnakeSettings;
use super::snake::{Snake, SnakeSegment};
use super::types::{CellState, DeathReason, Direction, GameError, MoveOutcome, Position};

/// One player's game: board, snake and food plus scoring and pacing.
/// The best score outlives `reinitialize`, everything else is reset.
pub struct SnakeGameState {
    settings: SnakeSettings,
    board: Board,
    snake: Snake,
    food: Food,
    rng: SessionRng,
    score: u32,
    best_score: u32,
    speed_multiplier: f64,
    tick_interval: Duration,
    game_over: bool,
    listeners: Vec<Box<dyn GameEventListener>>,
}

impl SnakeGameState {
    /// Fails with `InvalidSettings` when the settings are out of range, e.g. a board too
    /// small to hold the starting snake.
    pub fn new(settings: &SnakeSettings, rng: SessionRng) -> Result<Self, GameError> {
        settings.validate().map_err(GameError::InvalidSettings)?;

        let mut board = Board::new(settings.rows, settings.columns);
        let snake = Snake::new(&mut board);

        let mut state = Self {
            settings: settings.clone(),
            board,
            snake,
            food: Food::new(),
            rng,
            score: 0,
            best_score: 0,
            speed_multiplier: 1.0,
            tick_interval: settings.base_tick_interval(),
            game_over: false,
            listeners: Vec::new(),
        };
        state.food.initialize(&mut state.board, &mut state.rng);
        Ok(state)
    }

    pub fn with_size(rows: usize, columns: usize) -> Result<Self, GameError> {
        Self::new(&SnakeSettings::with_size(rows, columns), SessionRng::from_random())
    }

    pub fn reinitialize(&mut self) {
        self.board.initialize();
        self.snake.initialize(&mut self.board);
        self.food.initialize(&mut self.board, &mut self.rng);
        self.score = 0;
        self.speed_multiplier = 1.0;
        self.tick_interval = self.settings.base_tick_interval();
        self.game_over = false;
        log!(
            "New game on {}x{} board, best score so far {}",
            self.board.rows(),
            self.board.columns(),
            self.best_score
        );
    }

    pub fn add_listener(&mut self, listener: Box<dyn GameEventListener>) {
        self.listeners.push(listener);
    }

    pub fn change_direction(&mut self, direction: Direction) -> bool {
        self.snake.change_direction(direction)
    }

    /// Runs one tick. Calling it after the game ended is a caller bug and applies nothing.
    pub fn move_snake(&mut self) -> Result<MoveOutcome, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }

        let outcome = self.snake.move_once(&mut self.board)?;
        match outcome {
            MoveOutcome::Moved => {}
            MoveOutcome::Ate => self.handle_eat_food(),
            MoveOutcome::Died(reason) => self.handle_game_over(reason),
        }
        Ok(outcome)
    }

    fn handle_eat_food(&mut self) {
        self.score += 1;
        self.food.consume();
        self.food.place_randomly(&mut self.board, &mut self.rng);

        if self.score % self.settings.points_per_speed_up == 0 {
            let speed_ups = self.score / self.settings.points_per_speed_up;
            self.speed_multiplier = 1.0 + f64::from(speed_ups) * self.settings.speed_step;
            self.tick_interval = self
                .settings
                .base_tick_interval()
                .div_f64(self.speed_multiplier);
            log!(
                "Speed up to {} ({} ms per tick)",
                self.speed_display(),
                self.tick_interval.as_millis()
            );
        }

        log!("Ate food. Score: {}", self.score);
        for listener in &mut self.listeners {
            listener.on_eat_food(self.score);
        }
    }

    fn handle_game_over(&mut self, reason: DeathReason) {
        self.game_over = true;
        self.best_score = self.best_score.max(self.score);
        log!(
            "Game over ({:?}). Score: {}, best: {}",
            reason,
            self.score,
            self.best_score
        );
        for listener in &mut self.listeners {
            listener.on_game_over(reason, self.score);
        }
    }

    pub fn cell_at(&self, row: i32, column: i32) -> CellState {
        self.board.cell_state_at(Position::new(row, column))
    }

    pub fn snake_segments(&self) -> impl ExactSizeIterator<Item = &SnakeSegment> + '_ {
        self.snake.segments()
    }

    pub fn current_direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn food(&self) -> Option<Position> {
        self.food.position()
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.snake.death_reason()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn speed_display(&self) -> String {
        format_speed(self.speed_multiplier)
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn columns(&self) -> usize {
        self.board.columns()
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    fn place_food_at(&mut self, position: Position) {
        self.food.place_at(&mut self.board, position);
    }

    #[cfg(test)]
    fn replace_snake(&mut self, positions: &[Position], direction: Direction) {
        self.board.initialize();
        self.snake = Snake::from_positions(&mut self.board, positions, direction);
        self.food.initialize(&mut self.board, &mut self.rng);
    }
}

/// "1x", "1.1x", "1.25x": at most two decimals, trailing zeros dropped.
pub fn format_speed(multiplier: f64) -> String {
    let fixed = format!("{:.2}", multiplier);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{}x", trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    fn create_state() -> SnakeGameState {
        SnakeGameState::new(&SnakeSettings::default(), SessionRng::new(42)).unwrap()
    }

    fn row(columns: std::ops::RangeInclusive<i32>) -> Vec<Position> {
        columns.rev().map(|column| Position::new(7, column)).collect()
    }

    fn assert_invariants(state: &SnakeGameState) {
        let positions: Vec<Position> = state.snake_segments().map(|s| s.position).collect();
        assert_eq!(positions.len(), state.board().count(CellState::Snake));
        let unique: HashSet<Position> = positions.iter().copied().collect();
        assert_eq!(unique.len(), positions.len());
        for position in positions {
            assert_eq!(state.cell_at(position.row, position.column), CellState::Snake);
        }
        assert!(state.board().count(CellState::Food) <= 1);
    }

    #[test]
    fn test_new_game_layout() {
        let state = create_state();

        assert_eq!(state.rows(), 15);
        assert_eq!(state.columns(), 15);
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
        assert_eq!(state.tick_interval(), Duration::from_millis(100));
        assert_eq!(state.speed_display(), "1x");
        assert_eq!(state.board().count(CellState::Food), 1);
        let food = state.food().unwrap();
        assert_eq!(state.cell_at(food.row, food.column), CellState::Food);
        assert_invariants(&state);
    }

    #[test]
    fn test_scenario_plain_move() {
        let mut state = create_state();
        state.place_food_at(Position::new(0, 0));

        assert_eq!(state.move_snake(), Ok(MoveOutcome::Moved));

        let positions: Vec<Position> = state.snake_segments().map(|s| s.position).collect();
        assert_eq!(positions, row(2..=4));
        assert_eq!(state.cell_at(7, 1), CellState::Empty);
        assert_invariants(&state);
    }

    #[test]
    fn test_scenario_eat_food() {
        let mut state = create_state();
        state.place_food_at(Position::new(7, 4));

        assert!(!state.change_direction(Direction::Right));
        assert_eq!(state.move_snake(), Ok(MoveOutcome::Ate));

        assert_eq!(state.snake_segments().len(), 4);
        assert_eq!(state.score(), 1);
        let food = state.food().unwrap();
        assert_ne!(food, Position::new(7, 4));
        assert_eq!(state.cell_at(food.row, food.column), CellState::Food);
        assert_invariants(&state);
    }

    #[test]
    fn test_scenario_wall_game_over() {
        let mut state = create_state();
        state.replace_snake(&row(12..=14), Direction::Right);
        let before: Vec<SnakeSegment> = state.snake_segments().copied().collect();

        assert_eq!(
            state.move_snake(),
            Ok(MoveOutcome::Died(DeathReason::WallCollision))
        );

        assert!(state.is_game_over());
        assert_eq!(state.snake_segments().copied().collect::<Vec<_>>(), before);
        assert_eq!(state.move_snake(), Err(GameError::GameOver));
        assert_eq!(state.snake_segments().len(), 3);
    }

    #[test]
    fn test_scenario_reverse_of_new_direction_rejected() {
        let mut state = create_state();
        state.replace_snake(&row(1..=5), Direction::Right);
        state.place_food_at(Position::new(0, 0));

        assert!(state.change_direction(Direction::Down));
        state.move_snake().unwrap();
        assert_eq!(state.current_direction(), Direction::Down);
        assert_eq!(state.snake_segments().next().unwrap().position, Position::new(8, 5));

        assert!(!state.change_direction(Direction::Up));
        state.move_snake().unwrap();
        assert_eq!(state.snake_segments().next().unwrap().position, Position::new(9, 5));
    }

    #[test]
    fn test_speed_increases_every_two_points() {
        let mut state = create_state();
        let mut eaten = 0;
        for column in 4..=7 {
            state.place_food_at(Position::new(7, column));
            assert_eq!(state.move_snake(), Ok(MoveOutcome::Ate));
            eaten += 1;
            assert_eq!(state.score(), eaten);
        }

        assert!((state.speed_multiplier() - 1.2).abs() < 1e-9);
        assert_eq!(state.speed_display(), "1.2x");
        assert_eq!(
            state.tick_interval(),
            Duration::from_millis(100).div_f64(state.speed_multiplier())
        );
        assert!(state.tick_interval() < Duration::from_millis(100));
    }

    #[test]
    fn test_odd_score_does_not_change_speed() {
        let mut state = create_state();
        state.place_food_at(Position::new(7, 4));
        state.move_snake().unwrap();
        assert_eq!(state.speed_display(), "1x");
        assert_eq!(state.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_reinitialize_keeps_best_score() {
        let mut state = create_state();
        state.place_food_at(Position::new(7, 4));
        state.move_snake().unwrap();
        state.place_food_at(Position::new(7, 5));
        state.move_snake().unwrap();
        state.change_direction(Direction::Up);
        while !state.is_game_over() {
            state.place_food_at(Position::new(14, 14));
            state.move_snake().unwrap();
        }
        assert_eq!(state.best_score(), 2);

        state.reinitialize();

        assert_eq!(state.score(), 0);
        assert_eq!(state.best_score(), 2);
        assert!(!state.is_game_over());
        assert_eq!(state.tick_interval(), Duration::from_millis(100));
        assert_eq!(state.speed_display(), "1x");
        assert_eq!(state.board().count(CellState::Snake), 3);
        assert_eq!(state.board().count(CellState::Food), 1);
        assert_eq!(
            state.board().count(CellState::Empty),
            15 * 15 - 4
        );
    }

    #[test]
    fn test_lower_score_does_not_replace_best() {
        let mut state = create_state();
        state.place_food_at(Position::new(7, 4));
        state.move_snake().unwrap();
        state.replace_snake(&row(12..=14), Direction::Right);
        state.move_snake().unwrap();
        assert_eq!(state.best_score(), 1);

        state.reinitialize();
        state.replace_snake(&row(12..=14), Direction::Right);
        state.move_snake().unwrap();
        assert_eq!(state.best_score(), 1);
    }

    #[test]
    fn test_invariants_hold_during_random_play() {
        let mut state = create_state();
        let mut rng = SessionRng::new(2024);
        let mut games = 0;

        for _ in 0..5000 {
            if let Some(direction) = rng.pick(&Direction::ALL) {
                state.change_direction(direction);
            }
            state.move_snake().unwrap();
            assert_invariants(&state);
            assert!(state.snake_segments().len() >= 3);

            if state.is_game_over() {
                games += 1;
                state.reinitialize();
            }
        }

        assert!(games > 0);
    }

    #[derive(Default)]
    struct Recorded {
        eaten: Vec<u32>,
        game_over: Option<(DeathReason, u32)>,
    }

    struct RecordingListener(Arc<Mutex<Recorded>>);

    impl GameEventListener for RecordingListener {
        fn on_eat_food(&mut self, score: u32) {
            self.0.lock().unwrap().eaten.push(score);
        }

        fn on_game_over(&mut self, reason: DeathReason, final_score: u32) {
            self.0.lock().unwrap().game_over = Some((reason, final_score));
        }
    }

    #[test]
    fn test_listeners_receive_events() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut state = create_state();
        state.add_listener(Box::new(RecordingListener(recorded.clone())));

        state.place_food_at(Position::new(7, 4));
        state.move_snake().unwrap();
        state.replace_snake(&row(12..=14), Direction::Right);
        state.move_snake().unwrap();

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.eaten, vec![1]);
        assert_eq!(recorded.game_over, Some((DeathReason::WallCollision, 1)));
    }

    #[test]
    fn test_board_too_small_for_starting_snake_is_rejected() {
        for (rows, columns) in [(15, 3), (15, 0), (0, 15), (1, 1)] {
            let result = SnakeGameState::with_size(rows, columns);
            assert!(
                matches!(result, Err(GameError::InvalidSettings(_))),
                "{}x{} should be rejected",
                rows,
                columns
            );
        }
    }

    #[test]
    fn test_smallest_board_keeps_snake_on_the_board() {
        let state = SnakeGameState::new(&SnakeSettings::with_size(5, 5), SessionRng::new(1)).unwrap();
        assert_eq!(state.snake_segments().len(), state.board().count(CellState::Snake));
        assert_invariants(&state);
    }

    #[test]
    fn test_zero_points_per_speed_up_is_rejected() {
        let settings = SnakeSettings {
            points_per_speed_up: 0,
            ..SnakeSettings::default()
        };
        let result = SnakeGameState::new(&settings, SessionRng::new(42));
        assert!(matches!(result, Err(GameError::InvalidSettings(_))));
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(1.0), "1x");
        assert_eq!(format_speed(1.1), "1.1x");
        assert_eq!(format_speed(1.25), "1.25x");
        assert_eq!(format_speed(1.0 + 3.0 * 0.1), "1.3x");
        assert_eq!(format_speed(2.0), "2x");
    }
}
