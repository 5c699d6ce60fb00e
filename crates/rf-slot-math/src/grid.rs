//! Grid synthesis — one weighted symbol matrix per outcome

use std::fmt;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::GameMode;
use crate::error::CatalogError;
use crate::symbols::{Symbol, SymbolWeights};

/// Grid rows
pub const ROWS: usize = 5;
/// Grid columns
pub const COLS: usize = 5;
/// Total grid cells
pub const CELLS: usize = ROWS * COLS;

/// A 5×5 symbol matrix, serialized as nested arrays of symbol codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid([[Symbol; COLS]; ROWS]);

impl Grid {
    /// Build from explicit rows
    pub fn from_rows(rows: [[Symbol; COLS]; ROWS]) -> Self {
        Self(rows)
    }

    /// Grid filled with a single symbol
    pub fn filled(symbol: Symbol) -> Self {
        Self([[symbol; COLS]; ROWS])
    }

    /// Rows, top to bottom
    pub fn rows(&self) -> &[[Symbol; COLS]; ROWS] {
        &self.0
    }

    /// Symbol at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<Symbol> {
        self.0.get(row).and_then(|r| r.get(col)).copied()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.iter().flat_map(|row| row.iter().copied())
    }

    /// Number of cells holding `symbol`
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells().filter(|&s| s == symbol).count()
    }

    /// Number of scatter cells
    pub fn scatter_count(&self) -> usize {
        self.count(Symbol::S)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, symbol) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}

/// Draws grids from a fixed symbol distribution.
///
/// The synthesizer holds no RNG of its own; callers pass the run's single
/// stream so the draw order stays tied to bucket and sample iteration.
#[derive(Debug, Clone)]
pub struct GridSynthesizer {
    symbols: Vec<Symbol>,
    index: WeightedIndex<f64>,
}

impl GridSynthesizer {
    /// Create from a validated weight table
    pub fn new(weights: &SymbolWeights) -> Result<Self, CatalogError> {
        weights.validate()?;
        let index = WeightedIndex::new(weights.weights())
            .map_err(|e| CatalogError::InvalidWeights(e.to_string()))?;

        Ok(Self {
            symbols: weights.symbols(),
            index,
        })
    }

    /// Produce one grid holding exactly `scatter_target` scatters.
    ///
    /// Fills all 25 cells row-major from the weighted draw, then, for a
    /// non-zero target, shuffles every coordinate and overwrites the first
    /// `scatter_target` with `S`. Targets above 25 saturate the grid.
    /// Both modes draw from the same distribution; `_mode` does not affect
    /// the grid or the number of values taken from `rng`.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        scatter_target: u8,
        _mode: GameMode,
    ) -> Grid {
        let mut cells = [[Symbol::A; COLS]; ROWS];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = self.symbols[self.index.sample(rng)];
            }
        }

        if scatter_target > 0 {
            let mut positions: Vec<(usize, usize)> = (0..ROWS)
                .flat_map(|r| (0..COLS).map(move |c| (r, c)))
                .collect();
            positions.shuffle(rng);
            for &(r, c) in positions.iter().take(scatter_target as usize) {
                cells[r][c] = Symbol::S;
            }
        }

        Grid(cells)
    }
}
