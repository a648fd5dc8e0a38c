//! The toroidal cell grid and its neighbor counting.
//!
//! A [`Grid`] is a fixed `rows x cols` field of [`Cell`]s whose edges wrap
//! around. Neighbors are the eight cells one or two steps away along a single
//! axis (an extended von Neumann neighborhood); diagonals are not counted.

use std::collections::HashMap;
use std::io::Write;

use log::{debug, trace};
use rand::Rng;

use crate::cell::Cell;
use crate::error::GridError;

/// Largest accepted number of rows or columns.
pub const MAX_SIZE: usize = 100;

/// Neighbor count reported for a wall cell, whatever surrounds it.
pub const WALL_NEIGHBOR_COUNT: u8 = 2;

/// Default probability of a live cell used by [`Grid::reset_default`].
pub const DEFAULT_LIVE_PROBABILITY: f64 = 0.5;
/// Default probability of a wall cell used by [`Grid::reset_default`].
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.1;

/// `(row, col)` offsets of the extended von Neumann neighborhood.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (0, 2),
    (0, -1),
    (0, -2),
    (1, 0),
    (2, 0),
    (-1, 0),
    (-2, 0),
];

/// Wraps a possibly out-of-bounds index back onto `0..bound`.
///
/// For the offsets in [`NEIGHBOR_OFFSETS`] and any `bound >= 2` this is the
/// same as subtracting `bound` once on overflow and adding it once on
/// underflow. Panics if `bound` is zero.
pub fn wrap(index: isize, bound: usize) -> usize {
    index.rem_euclid(bound as isize) as usize
}

/// Display symbol for each cell state, used by [`Grid::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMap {
    symbols: HashMap<Cell, String>,
}

impl SymbolMap {
    /// A map with no symbols at all.
    pub fn empty() -> Self {
        Self {
            symbols: HashMap::new(),
        }
    }

    /// Sets the symbol shown for `cell`.
    pub fn with(mut self, cell: Cell, symbol: impl Into<String>) -> Self {
        self.symbols.insert(cell, symbol.into());
        self
    }

    /// Removes the symbol for `cell`.
    pub fn without(mut self, cell: Cell) -> Self {
        self.symbols.remove(&cell);
        self
    }

    pub fn get(&self, cell: Cell) -> Option<&str> {
        self.symbols.get(&cell).map(String::as_str)
    }
}

impl Default for SymbolMap {
    /// Wall `X`, empty `0`, alive `1`.
    fn default() -> Self {
        Self::empty()
            .with(Cell::Wall, "X")
            .with(Cell::Empty, "0")
            .with(Cell::Alive, "1")
    }
}

impl<S: Into<String>> FromIterator<(Cell, S)> for SymbolMap {
    fn from_iter<I: IntoIterator<Item = (Cell, S)>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().map(|(c, s)| (c, s.into())).collect(),
        }
    }
}

/// Number of cells in each state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellCounts {
    pub alive: usize,
    pub empty: usize,
    pub walls: usize,
}

/// A fixed-size toroidal field of tri-state cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Row-major cell storage, `rows` vectors of `cols` cells each
    cells: Vec<Vec<Cell>>,
    rows: usize,
    cols: usize,
}

impl Grid {
    pub const MAX_SIZE: usize = MAX_SIZE;

    /// Creates a grid with every cell [`Cell::Empty`].
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidDimensions`] unless both `rows` and `cols` lie in
    /// `1..=MAX_SIZE`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if !(1..=MAX_SIZE).contains(&rows) || !(1..=MAX_SIZE).contains(&cols) {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        debug!("Created {}x{} grid", rows, cols);
        Ok(Grid {
            cells: vec![vec![Cell::Empty; cols]; rows],
            rows,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Read-only view of the cell rows.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        self.check_bounds(row, col)?;
        Ok(self.cells[row][col])
    }

    /// Refills every cell at random.
    ///
    /// Each cell first becomes a wall with probability `wall_probability`;
    /// otherwise a second draw makes it alive with probability
    /// `live_probability`. Probabilities outside `[0, 1]` are accepted and
    /// simply always or never trigger.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        live_probability: f64,
        wall_probability: f64,
    ) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = if rng.gen::<f64>() < wall_probability {
                    Cell::Wall
                } else if rng.gen::<f64>() < live_probability {
                    Cell::Alive
                } else {
                    Cell::Empty
                };
            }
        }

        let counts = self.population();
        debug!(
            "Reset grid (live={}, wall={}): {} alive, {} empty, {} walls",
            live_probability, wall_probability, counts.alive, counts.empty, counts.walls
        );
    }

    /// [`reset`](Self::reset) with a live probability of 0.5 and a wall
    /// probability of 0.1.
    pub fn reset_default<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.reset(rng, DEFAULT_LIVE_PROBABILITY, DEFAULT_WALL_PROBABILITY);
    }

    /// Overwrites one cell with [`Cell::Empty`] or [`Cell::Alive`].
    ///
    /// Walls can't be created this way, but an existing wall is overwritten
    /// like any other cell. Returns the grid for chaining.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidCellValue`] if `value` is [`Cell::Wall`]; the
    ///   grid is left untouched.
    /// - [`GridError::OutOfRange`] if the coordinate is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<&mut Self, GridError> {
        if !value.is_settable() {
            return Err(GridError::InvalidCellValue(value.value()));
        }
        self.check_bounds(row, col)?;
        trace!("Set ({}, {}) from {:?} to {:?}", row, col, self.cells[row][col], value);
        self.cells[row][col] = value;
        Ok(self)
    }

    /// [`set`](Self::set) from a numeric cell value (`0` or `1`).
    pub fn set_value(&mut self, row: usize, col: usize, value: i8) -> Result<&mut Self, GridError> {
        let cell = Cell::try_from(value)?;
        self.set(row, col, cell)
    }

    /// Number of live cells in the extended neighborhood of `(row, col)`.
    ///
    /// A wall cell always reports [`WALL_NEIGHBOR_COUNT`] without looking at
    /// its neighbors. Neighbor walls contribute nothing.
    pub fn neighbor_count(&self, row: usize, col: usize) -> Result<u8, GridError> {
        self.check_bounds(row, col)?;
        Ok(self.count_at(row, col))
    }

    /// Neighbor count of every cell, as a freshly allocated `rows x cols` array.
    pub fn neighbor_count_map(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|row| (0..self.cols).map(|col| self.count_at(row, col)).collect())
            .collect()
    }

    /// Formats each row as its cells' symbols joined by `separator`.
    ///
    /// # Errors
    ///
    /// [`GridError::MissingSymbol`] if a cell present in the grid has no
    /// entry in `symbols`.
    pub fn render(&self, symbols: &SymbolMap, separator: &str) -> Result<Vec<String>, GridError> {
        self.cells
            .iter()
            .map(|row| {
                let tokens = row
                    .iter()
                    .map(|&cell| symbols.get(cell).ok_or(GridError::MissingSymbol(cell)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(tokens.join(separator))
            })
            .collect()
    }

    /// Writes [`render`](Self::render)ed lines to `writer`, one per row.
    ///
    /// Nothing is written if rendering fails.
    pub fn write_to<W: Write>(
        &self,
        writer: &mut W,
        symbols: &SymbolMap,
        separator: &str,
    ) -> Result<(), GridError> {
        for line in self.render(symbols, separator)? {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }

    /// Counts the cells in each state.
    pub fn population(&self) -> CellCounts {
        self.cells
            .iter()
            .flatten()
            .fold(CellCounts::default(), |mut counts, cell| {
                match cell {
                    Cell::Alive => counts.alive += 1,
                    Cell::Empty => counts.empty += 1,
                    Cell::Wall => counts.walls += 1,
                }
                counts
            })
    }

    fn count_at(&self, row: usize, col: usize) -> u8 {
        if self.cells[row][col] == Cell::Wall {
            return WALL_NEIGHBOR_COUNT;
        }

        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dr, dc)| {
                let nr = wrap(row as isize + dr, self.rows);
                let nc = wrap(col as isize + dc, self.cols);
                self.cells[nr][nc].contribution()
            })
            .sum()
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn walled_grid(rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        grid.reset(&mut StdRng::seed_from_u64(7), 0.5, 1.0);
        grid
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        for (rows, cols) in [(0, 5), (5, 0), (101, 5), (5, 101)] {
            assert!(matches!(
                Grid::new(rows, cols),
                Err(GridError::InvalidDimensions { .. })
            ));
        }
        assert!(Grid::new(100, 100).is_ok());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.size(), (3, 3));
        assert!(grid.cells().iter().flatten().all(|&c| c == Cell::Empty));
        assert_eq!(
            grid.population(),
            CellCounts {
                alive: 0,
                empty: 9,
                walls: 0
            }
        );
    }

    #[test]
    fn test_dimensions_are_not_swapped() {
        let grid = Grid::new(2, 7).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 7);
        assert_eq!(grid.cells().len(), 2);
        assert_eq!(grid.cells()[0].len(), 7);
    }

    #[test]
    fn test_wall_cells_report_sentinel() {
        let mut grid = walled_grid(5, 5);
        assert!(grid
            .neighbor_count_map()
            .iter()
            .flatten()
            .all(|&count| count == WALL_NEIGHBOR_COUNT));

        // Live neighbors don't change a wall's count.
        grid.set(0, 2, Cell::Alive)
            .unwrap()
            .set(1, 2, Cell::Alive)
            .unwrap()
            .set(2, 3, Cell::Alive)
            .unwrap()
            .set(2, 4, Cell::Alive)
            .unwrap();
        assert_eq!(grid.neighbor_count(2, 2).unwrap(), WALL_NEIGHBOR_COUNT);
        assert_eq!(grid.neighbor_count(3, 2).unwrap(), WALL_NEIGHBOR_COUNT);
    }

    #[test]
    fn test_neighbor_count_wraps_both_directions() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(0, 0, Cell::Alive).unwrap();

        // (2,0) sees (0,0) through +1 overflow and -2 underflow.
        assert_eq!(grid.neighbor_count(2, 0).unwrap(), 2);
        assert_eq!(grid.neighbor_count(0, 2).unwrap(), 2);
        assert_eq!(grid.neighbor_count(1, 0).unwrap(), 2);
        assert_eq!(grid.neighbor_count(0, 0).unwrap(), 0);
        // Diagonals are outside the neighborhood.
        assert_eq!(grid.neighbor_count(1, 1).unwrap(), 0);
        assert_eq!(grid.neighbor_count(2, 2).unwrap(), 0);
    }

    #[test]
    fn test_query_cell_excluded_from_its_count() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, Cell::Alive).unwrap();
        assert_eq!(grid.neighbor_count(1, 1).unwrap(), 0);
    }

    #[test]
    fn test_neighbor_count_reaches_two_steps() {
        let mut grid = Grid::new(7, 7).unwrap();
        grid.set(3, 5, Cell::Alive)
            .unwrap()
            .set(1, 3, Cell::Alive)
            .unwrap()
            .set(3, 3, Cell::Alive)
            .unwrap()
            .set(4, 4, Cell::Alive)
            .unwrap();
        // (3,5) and (1,3) are two steps away; (4,4) is diagonal.
        assert_eq!(grid.neighbor_count(3, 3).unwrap(), 2);
    }

    #[test]
    fn test_neighbor_walls_contribute_nothing() {
        let mut grid = walled_grid(4, 4);
        grid.set(1, 1, Cell::Empty).unwrap();
        assert_eq!(grid.neighbor_count(1, 1).unwrap(), 0);
    }

    #[test]
    fn test_narrow_grids_wrap_onto_themselves() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(0, 0, Cell::Alive).unwrap();
        // From (0,1): (0,0) via col +1 and col -1, (0,1) itself via +/-2.
        assert_eq!(grid.neighbor_count(0, 1).unwrap(), 2);
        // From (0,0): +/-2 on both axes lands back on the live query cell.
        assert_eq!(grid.neighbor_count(0, 0).unwrap(), 4);

        let mut single = Grid::new(1, 1).unwrap();
        single.set(0, 0, Cell::Alive).unwrap();
        assert_eq!(single.neighbor_count(0, 0).unwrap(), 8);
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let mut grid = Grid::new(3, 4).unwrap();
        assert!(matches!(
            grid.neighbor_count(3, 0),
            Err(GridError::OutOfRange { row: 3, col: 0, .. })
        ));
        assert!(matches!(
            grid.set(0, 4, Cell::Alive),
            Err(GridError::OutOfRange { .. })
        ));
        assert!(grid.cell(2, 3).is_ok());
        assert!(grid.cell(2, 4).is_err());
    }

    #[test]
    fn test_set_rejects_walls_and_bad_values() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(matches!(
            grid.set(0, 0, Cell::Wall),
            Err(GridError::InvalidCellValue(-1))
        ));
        assert!(matches!(
            grid.set_value(0, 0, -1),
            Err(GridError::InvalidCellValue(-1))
        ));
        assert!(matches!(
            grid.set_value(0, 0, 2),
            Err(GridError::InvalidCellValue(2))
        ));
        assert_eq!(grid.cell(0, 0).unwrap(), Cell::Empty);

        grid.set_value(0, 0, 1).unwrap();
        assert_eq!(grid.cell(0, 0).unwrap(), Cell::Alive);
    }

    #[test]
    fn test_set_clears_existing_wall() {
        let mut grid = walled_grid(3, 3);
        grid.set(1, 1, Cell::Alive).unwrap();
        assert_eq!(grid.cell(1, 1).unwrap(), Cell::Alive);
        assert_eq!(grid.population().walls, 8);
    }

    #[test]
    fn test_reset_is_deterministic_under_seed() {
        let mut a = Grid::new(20, 30).unwrap();
        let mut b = Grid::new(20, 30).unwrap();
        a.reset_default(&mut StdRng::seed_from_u64(42));
        b.reset_default(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);

        let counts = a.population();
        assert_eq!(counts.alive + counts.empty + counts.walls, 600);
        assert!(counts.walls > 0);
        assert!(counts.alive > counts.walls);
    }

    #[test]
    fn test_reset_extreme_probabilities() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(6, 6).unwrap();

        grid.reset(&mut rng, 1.0, 0.0);
        assert_eq!(grid.population().alive, 36);

        grid.reset(&mut rng, 0.0, 0.0);
        assert_eq!(grid.population().empty, 36);

        // Walls take precedence over life.
        grid.reset(&mut rng, 1.0, 1.0);
        assert_eq!(grid.population().walls, 36);

        // Out-of-range probabilities are accepted.
        grid.reset(&mut rng, 2.0, -1.0);
        assert_eq!(grid.population().alive, 36);
        grid.reset(&mut rng, -0.5, 1.5);
        assert_eq!(grid.population().walls, 36);
    }

    #[test]
    fn test_neighbor_count_map_matches_point_queries() {
        let mut grid = Grid::new(9, 11).unwrap();
        grid.reset_default(&mut StdRng::seed_from_u64(99));

        let map = grid.neighbor_count_map();
        assert_eq!(map.len(), 9);
        for (row, counts) in map.iter().enumerate() {
            assert_eq!(counts.len(), 11);
            for (col, &count) in counts.iter().enumerate() {
                assert_eq!(count, grid.neighbor_count(row, col).unwrap());
            }
        }
        assert_eq!(map, grid.neighbor_count_map());
    }

    #[test]
    fn test_render_default_symbols() {
        let grid = Grid::new(2, 3).unwrap();
        let lines = grid.render(&SymbolMap::default(), " ").unwrap();
        assert_eq!(lines, vec!["0 0 0", "0 0 0"]);

        let mut grid = walled_grid(1, 2);
        grid.set(0, 1, Cell::Alive).unwrap();
        assert_eq!(grid.render(&SymbolMap::default(), ",").unwrap(), vec!["X,1"]);
    }

    #[test]
    fn test_render_missing_symbol() {
        let symbols = SymbolMap::default().without(Cell::Wall);

        // Only symbols for cells actually present are required.
        let grid = Grid::new(2, 2).unwrap();
        assert!(grid.render(&symbols, " ").is_ok());

        let grid = walled_grid(2, 2);
        assert!(matches!(
            grid.render(&symbols, " "),
            Err(GridError::MissingSymbol(Cell::Wall))
        ));
    }

    #[test]
    fn test_write_to() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(1, 0, Cell::Alive).unwrap();
        let symbols: SymbolMap = [(Cell::Empty, "."), (Cell::Alive, "#")].into_iter().collect();

        let mut out = Vec::new();
        grid.write_to(&mut out, &symbols, "").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "..\n#.\n");

        let mut out = Vec::new();
        let walls = walled_grid(2, 2);
        assert!(walls.write_to(&mut out, &symbols, "").is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_wrap_single_step_rule() {
        assert_eq!(wrap(3, 3), 0);
        assert_eq!(wrap(4, 3), 1);
        assert_eq!(wrap(-1, 3), 2);
        assert_eq!(wrap(-2, 3), 1);
        assert_eq!(wrap(1, 3), 1);
    }

    proptest! {
        #[test]
        fn prop_wrap_matches_single_correction(bound in 2usize..=MAX_SIZE, offset in -2isize..=2, seed in 0usize..MAX_SIZE) {
            let index = (seed % bound) as isize + offset;
            let mut expected = index;
            if expected >= bound as isize {
                expected -= bound as isize;
            }
            if expected < 0 {
                expected += bound as isize;
            }
            prop_assert_eq!(wrap(index, bound), expected as usize);
        }
    }
}
