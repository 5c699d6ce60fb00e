//! Symbol alphabet and draw weights

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SymbolType {
    /// Regular paying symbol
    Regular = 0,
    /// Wild - substitutes for others when clusters are formed
    Wild = 1,
    /// Scatter - counted anywhere on the grid, triggers free spins
    Scatter = 2,
}

/// A grid symbol, serialized as its single-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    A,
    B,
    C,
    D,
    /// Wild
    W,
    /// Scatter
    S,
}

impl Symbol {
    /// Full alphabet in declaration order
    pub const ALL: [Symbol; 6] = [
        Symbol::A,
        Symbol::B,
        Symbol::C,
        Symbol::D,
        Symbol::W,
        Symbol::S,
    ];

    /// Symbols that carry a cluster payout
    pub const PAYING: [Symbol; 4] = [Symbol::A, Symbol::B, Symbol::C, Symbol::D];

    /// Classification of this symbol
    pub fn symbol_type(self) -> SymbolType {
        match self {
            Symbol::W => SymbolType::Wild,
            Symbol::S => SymbolType::Scatter,
            _ => SymbolType::Regular,
        }
    }

    /// Wild or scatter
    pub fn is_special(self) -> bool {
        self.symbol_type() != SymbolType::Regular
    }

    /// Whether the cluster paytable awards anything for this symbol
    pub fn pays(self) -> bool {
        !self.is_special()
    }

    /// Single-letter code
    pub fn code(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::B => 'B',
            Symbol::C => 'C',
            Symbol::D => 'D',
            Symbol::W => 'W',
            Symbol::S => 'S',
        }
    }

    /// Parse a single-letter code
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Symbol::from_code(c).ok_or_else(|| format!("Unknown symbol: {}", s))
            }
            _ => Err(format!("Unknown symbol: {}", s)),
        }
    }
}

/// Weighted categorical distribution over the non-scatter alphabet.
///
/// Scatters never come from the draw; they are placed afterwards at an
/// exact count, so a weight for `S` is rejected by [`SymbolWeights::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolWeights {
    /// (symbol, weight) pairs in draw order
    pub entries: Vec<(Symbol, f64)>,
}

impl SymbolWeights {
    /// Standard cluster-game distribution, wild kept rare
    pub fn standard() -> Self {
        Self {
            entries: vec![
                (Symbol::A, 0.26),
                (Symbol::B, 0.26),
                (Symbol::C, 0.22),
                (Symbol::D, 0.20),
                (Symbol::W, 0.06),
            ],
        }
    }

    /// Symbols in draw order
    pub fn symbols(&self) -> Vec<Symbol> {
        self.entries.iter().map(|(s, _)| *s).collect()
    }

    /// Weights in draw order
    pub fn weights(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, w)| *w).collect()
    }

    /// Weight for a symbol (0 if absent)
    pub fn get(&self, symbol: Symbol) -> f64 {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Check the distribution can drive a weighted draw
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::InvalidWeights("no symbols".into()));
        }
        for (symbol, weight) in &self.entries {
            if *symbol == Symbol::S {
                return Err(CatalogError::InvalidWeights(
                    "scatter is placed explicitly and cannot be drawn".into(),
                ));
            }
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(CatalogError::InvalidWeights(format!(
                    "{} has weight {}",
                    symbol, weight
                )));
            }
        }
        let mut seen = Vec::with_capacity(self.entries.len());
        for (symbol, _) in &self.entries {
            if seen.contains(symbol) {
                return Err(CatalogError::InvalidWeights(format!(
                    "{} listed twice",
                    symbol
                )));
            }
            seen.push(*symbol);
        }
        Ok(())
    }
}

impl Default for SymbolWeights {
    fn default() -> Self {
        Self::standard()
    }
}
