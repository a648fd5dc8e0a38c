use crate::cell::Cell;

/// Errors returned by [`Grid`](crate::Grid) operations.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Grid dimensions {rows}x{cols} must each be between 1 and {max}", max = crate::grid::MAX_SIZE)]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("Cell value {0} cannot be set directly (only 0 or 1)")]
    InvalidCellValue(i8),
    #[error("No display symbol for {0:?} cells")]
    MissingSymbol(Cell),
    #[error("Coordinate ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("Failed to write grid: {0}")]
    Io(#[from] std::io::Error),
}
