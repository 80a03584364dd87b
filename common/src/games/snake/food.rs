use crate::games::SessionRng;
use crate::log;

use super::board::Board;
use super::types::{CellState, Position};

/// The single food item on the board.
#[derive(Clone, Debug, Default)]
pub struct Food {
    position: Option<Position>,
}

impl Food {
    pub fn new() -> Self {
        Self { position: None }
    }

    pub fn initialize(&mut self, board: &mut Board, rng: &mut SessionRng) {
        self.position = None;
        self.place_randomly(board, rng);
    }

    /// Puts food on a uniformly chosen empty cell. A full board leaves things as they are.
    pub fn place_randomly(&mut self, board: &mut Board, rng: &mut SessionRng) -> Option<Position> {
        let position = rng.choose(board.empty_positions())?;

        board.set_cell(position, CellState::Food);
        self.position = Some(position);
        log!("Food placed at ({}, {})", position.row, position.column);
        Some(position)
    }

    pub fn consume(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, board: &mut Board, position: Position) {
        if let Some(old) = self.position
            && board.cell_state_at(old) == CellState::Food
        {
            board.set_cell(old, CellState::Empty);
        }
        board.set_cell(position, CellState::Food);
        self.position = Some(position);
    }
}
