//! Terminal viewer configuration.

use std::time::Duration;

use crate::error::GridError;
use crate::grid::{Grid, DEFAULT_LIVE_PROBABILITY, DEFAULT_WALL_PROBABILITY};

/// Settings for the `toroid-life` viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Grid height in cells
    pub rows: usize,
    /// Grid width in cells
    pub cols: usize,
    /// Probability passed to `Grid::reset` for live cells
    pub live_probability: f64,
    /// Probability passed to `Grid::reset` for walls
    pub wall_probability: f64,
    /// Fixed RNG seed; entropy is used when `None`
    pub seed: Option<u64>,
    /// Redraw interval
    pub tick_rate: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            cols: 80,
            live_probability: DEFAULT_LIVE_PROBABILITY,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            seed: None,
            tick_rate: Duration::from_millis(100),
        }
    }
}

impl ViewerConfig {
    /// Parses positional `[rows] [cols] [seed]` arguments (program name
    /// excluded). Missing arguments keep their defaults.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        if let Some(rows) = args.next() {
            config.rows = parse_arg("rows", rows.as_ref())?;
        }
        if let Some(cols) = args.next() {
            config.cols = parse_arg("cols", cols.as_ref())?;
        }
        if let Some(seed) = args.next() {
            config.seed = Some(parse_arg("seed", seed.as_ref())?);
        }
        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument(extra.as_ref().to_string()));
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the dimensions by building a grid of that size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Grid::new(self.rows, self.cols)?;
        Ok(())
    }
}

fn parse_arg<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidArgument {
        name,
        value: value.to_string(),
    })
}

/// Errors from building a [`ViewerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {name}")]
    InvalidArgument { name: &'static str, value: String },
    #[error("Unexpected argument {0:?} (usage: toroid-life [rows] [cols] [seed])")]
    UnexpectedArgument(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}
