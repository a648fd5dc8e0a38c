//! Tri-state cell values.

use crate::error::GridError;

/// Smallest numeric value accepted by [`Grid::set`](crate::Grid::set).
pub const MIN_CELL_VALUE: i8 = 0;
/// Largest numeric value accepted by [`Grid::set`](crate::Grid::set).
pub const MAX_CELL_VALUE: i8 = 1;

/// State of a single grid location.
///
/// Numerically a wall is `-1`, which keeps it outside the live/dead range
/// `MIN_CELL_VALUE..=MAX_CELL_VALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    Wall,
    #[default]
    Empty,
    Alive,
}

impl Cell {
    /// All variants, wall first.
    pub const ALL: [Cell; 3] = [Cell::Wall, Cell::Empty, Cell::Alive];

    /// Numeric encoding: wall `-1`, empty `0`, alive `1`.
    pub fn value(self) -> i8 {
        match self {
            Cell::Wall => -1,
            Cell::Empty => 0,
            Cell::Alive => 1,
        }
    }

    /// What this cell adds to a neighbor's count, `max(0, value)`.
    pub fn contribution(self) -> u8 {
        self.value().max(0) as u8
    }

    /// Whether the cell may be written through the single-cell setter.
    pub fn is_settable(self) -> bool {
        (MIN_CELL_VALUE..=MAX_CELL_VALUE).contains(&self.value())
    }
}

impl TryFrom<i8> for Cell {
    type Error = GridError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Cell::Wall),
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Alive),
            other => Err(GridError::InvalidCellValue(other)),
        }
    }
}

impl From<Cell> for i8 {
    fn from(cell: Cell) -> Self {
        cell.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_encoding() {
        assert_eq!(Cell::Wall.value(), -1);
        assert_eq!(Cell::Empty.value(), 0);
        assert_eq!(Cell::Alive.value(), 1);
        assert_eq!(Cell::default(), Cell::Empty);
    }

    #[test]
    fn test_contribution_ignores_walls() {
        assert_eq!(Cell::Wall.contribution(), 0);
        assert_eq!(Cell::Empty.contribution(), 0);
        assert_eq!(Cell::Alive.contribution(), 1);
    }

    #[test]
    fn test_try_from() {
        for cell in Cell::ALL {
            assert_eq!(Cell::try_from(cell.value()).unwrap(), cell);
        }
        assert!(matches!(
            Cell::try_from(2),
            Err(GridError::InvalidCellValue(2))
        ));
        assert!(matches!(
            Cell::try_from(-2),
            Err(GridError::InvalidCellValue(-2))
        ));
    }

    #[test]
    fn test_only_live_and_dead_are_settable() {
        assert!(Cell::Empty.is_settable());
        assert!(Cell::Alive.is_settable());
        assert!(!Cell::Wall.is_settable());
    }
}
