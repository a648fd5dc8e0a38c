//! Toroidal tri-state cellular automaton grid.
//!
//! Cells are empty, alive, or walls. The [`Grid`] wraps at its edges and
//! counts live neighbors over an extended von Neumann neighborhood: the two
//! nearest cells in each cardinal direction. It provides the substrate a
//! life rule consumes; it doesn't advance generations itself.
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use toroid_life::{Cell, Grid, SymbolMap};
//!
//! let mut grid = Grid::new(10, 10)?;
//! grid.reset(&mut StdRng::seed_from_u64(1), 0.5, 0.1);
//! grid.set(0, 0, Cell::Alive)?.set(0, 1, Cell::Empty)?;
//!
//! let counts = grid.neighbor_count_map();
//! assert_eq!(counts[0][0], grid.neighbor_count(0, 0)?);
//!
//! for line in grid.render(&SymbolMap::default(), " ")? {
//!     println!("{}", line);
//! }
//! # Ok::<(), toroid_life::GridError>(())
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod grid;

pub use cell::{Cell, MAX_CELL_VALUE, MIN_CELL_VALUE};
pub use config::{ConfigError, ViewerConfig};
pub use error::GridError;
pub use grid::{wrap, CellCounts, Grid, SymbolMap, MAX_SIZE, NEIGHBOR_OFFSETS};
