use super::types::{CellState, Position};

/// Row-major grid of cell states. Only `Empty`, `Snake` and `Food` are ever stored.
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<CellState>,
    rows: usize,
    columns: usize,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![CellState::Empty; rows * columns],
            rows,
            columns,
        }
    }

    pub fn initialize(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        let row = usize::try_from(position.row).ok()?;
        let column = usize::try_from(position.column).ok()?;
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(row * self.columns + column)
    }

    pub fn cell_state_at(&self, position: Position) -> CellState {
        match self.index_of(position) {
            Some(index) => self.cells[index],
            None => CellState::Outside,
        }
    }

    pub(crate) fn set_cell(&mut self, position: Position, state: CellState) {
        debug_assert!(state != CellState::Outside, "Outside is never stored");
        if let Some(index) = self.index_of(position) {
            self.cells[index] = state;
        }
    }

    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == CellState::Empty)
            .map(move |(index, _)| Position::new((index / columns) as i32, (index % columns) as i32))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }
}
