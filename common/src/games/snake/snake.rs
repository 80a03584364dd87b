use std::collections::VecDeque;

use super::board::Board;
use super::types::{CellState, DeathReason, Direction, GameError, MoveOutcome, Position};

pub const INITIAL_LENGTH: i32 = 3;
pub const MAX_PENDING_DIRECTIONS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnakeSegment {
    pub position: Position,
    /// Direction the snake was heading when this segment became the head.
    pub direction: Direction,
    /// Set once the head that followed this segment went a different way. Rendering only.
    pub is_turn: bool,
}

impl SnakeSegment {
    fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
            is_turn: false,
        }
    }
}

/// Body runs head (front) to tail (back).
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<SnakeSegment>,
    pending_directions: VecDeque<Direction>,
    direction: Direction,
    death_reason: Option<DeathReason>,
}

impl Snake {
    pub fn new(board: &mut Board) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            pending_directions: VecDeque::with_capacity(MAX_PENDING_DIRECTIONS),
            direction: Direction::Right,
            death_reason: None,
        };
        snake.initialize(board);
        snake
    }

    /// Lays a fresh snake on the middle row, columns 1..=3, heading right.
    /// Expects a board that was just cleared.
    pub fn initialize(&mut self, board: &mut Board) {
        self.body.clear();
        self.pending_directions.clear();
        self.direction = Direction::Right;
        self.death_reason = None;

        let middle_row = (board.rows() / 2) as i32;
        for column in 1..=INITIAL_LENGTH {
            let position = Position::new(middle_row, column);
            self.body.push_front(SnakeSegment::new(position, self.direction));
            board.set_cell(position, CellState::Snake);
        }
    }

    /// Buffers a turn for a later tick. Returns whether it was accepted; rejected turns are
    /// dropped without further notice.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        let reference = self.last_direction();
        if self.pending_directions.len() >= MAX_PENDING_DIRECTIONS
            || direction == reference
            || direction.is_opposite(&reference)
        {
            return false;
        }
        self.pending_directions.push_back(direction);
        true
    }

    fn last_direction(&self) -> Direction {
        self.pending_directions
            .back()
            .copied()
            .unwrap_or(self.direction)
    }

    /// Advances one cell. Collisions are judged against the board as it is before the move,
    /// so the cell the tail is about to leave still counts as body.
    pub fn move_once(&mut self, board: &mut Board) -> Result<MoveOutcome, GameError> {
        if !self.is_alive() {
            return Err(GameError::InvalidState("dead snake cannot move"));
        }

        if let Some(direction) = self.pending_directions.pop_front() {
            self.direction = direction;
        }

        let target = self.head()?.position.next(self.direction);

        match board.cell_state_at(target) {
            CellState::Outside => Ok(self.die(DeathReason::WallCollision)),
            CellState::Snake => Ok(self.die(DeathReason::SelfCollision)),
            CellState::Empty => {
                self.grow(board, target)?;
                self.remove_tail(board)?;
                Ok(MoveOutcome::Moved)
            }
            CellState::Food => {
                self.grow(board, target)?;
                Ok(MoveOutcome::Ate)
            }
        }
    }

    fn die(&mut self, reason: DeathReason) -> MoveOutcome {
        self.death_reason = Some(reason);
        MoveOutcome::Died(reason)
    }

    fn grow(&mut self, board: &mut Board, position: Position) -> Result<(), GameError> {
        let direction = self.direction;
        let previous_head = self
            .body
            .front_mut()
            .ok_or(GameError::InvalidState("snake body is empty"))?;
        if previous_head.direction != direction {
            previous_head.is_turn = true;
        }

        self.body.push_front(SnakeSegment::new(position, direction));
        board.set_cell(position, CellState::Snake);
        Ok(())
    }

    fn remove_tail(&mut self, board: &mut Board) -> Result<(), GameError> {
        let tail = self
            .body
            .pop_back()
            .ok_or(GameError::InvalidState("snake body is empty"))?;
        board.set_cell(tail.position, CellState::Empty);
        Ok(())
    }

    pub fn head(&self) -> Result<&SnakeSegment, GameError> {
        self.body
            .front()
            .ok_or(GameError::InvalidState("snake has no head"))
    }

    pub fn tail(&self) -> Result<&SnakeSegment, GameError> {
        self.body
            .back()
            .ok_or(GameError::InvalidState("snake has no tail"))
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &SnakeSegment> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_directions(&self) -> impl ExactSizeIterator<Item = &Direction> + '_ {
        self.pending_directions.iter()
    }

    pub fn is_alive(&self) -> bool {
        self.death_reason.is_none()
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Builds a snake from head-first positions, all facing `direction`.
    #[cfg(test)]
    pub(crate) fn from_positions(board: &mut Board, positions: &[Position], direction: Direction) -> Self {
        let mut body = VecDeque::new();
        for &position in positions {
            body.push_back(SnakeSegment::new(position, direction));
            board.set_cell(position, CellState::Snake);
        }
        Self {
            body,
            pending_directions: VecDeque::new(),
            direction,
            death_reason: None,
        }
    }
}
