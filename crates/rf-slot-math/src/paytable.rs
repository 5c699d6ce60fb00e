//! Cluster paytable — cluster size to payout, per symbol

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::symbols::Symbol;

/// Smallest cluster that pays
pub const MIN_CLUSTER: u8 = 4;
/// Largest possible cluster (whole grid)
pub const MAX_CLUSTER: u8 = 25;

/// Affine payout curve: `trunc(intercept + slope * (size - 4))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayCurve {
    /// Payout at the minimum cluster size
    pub intercept: f64,
    /// Increase per additional cell
    pub slope: f64,
}

impl PayCurve {
    /// Pays nothing at any size
    pub const ZERO: PayCurve = PayCurve {
        intercept: 0.0,
        slope: 0.0,
    };

    pub const fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// Payout in base-bet units, truncated toward zero
    pub fn payout(&self, size: u8) -> u32 {
        if size < MIN_CLUSTER {
            return 0;
        }
        let value = self.intercept + self.slope * f64::from(size - MIN_CLUSTER);
        if value > 0.0 { value as u32 } else { 0 }
    }

    /// Standard curve for a symbol; scarcer symbols pay more
    pub fn standard(symbol: Symbol) -> Self {
        match symbol {
            Symbol::A | Symbol::B => Self::new(2.0, 1.2),
            Symbol::C => Self::new(3.0, 1.5),
            Symbol::D => Self::new(4.0, 1.7),
            Symbol::W | Symbol::S => Self::ZERO,
        }
    }
}

/// Materialized paytable shared by every outcome of a run.
///
/// Serializes as `{ "A": { "4": 2, "5": 3, ... }, ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterPayTable {
    rows: BTreeMap<Symbol, BTreeMap<u8, u32>>,
}

impl ClusterPayTable {
    /// Standard table: A–D on their curves, wild and scatter at zero
    pub fn standard() -> Self {
        Self::from_curves(Symbol::ALL.map(|s| (s, PayCurve::standard(s))))
    }

    /// Build from explicit curves. Symbols left out get a zero row.
    pub fn from_curves(curves: impl IntoIterator<Item = (Symbol, PayCurve)>) -> Self {
        let mut rows: BTreeMap<Symbol, BTreeMap<u8, u32>> = Symbol::ALL
            .into_iter()
            .map(|s| (s, materialize(&PayCurve::ZERO)))
            .collect();
        for (symbol, curve) in curves {
            let curve = if symbol.pays() { curve } else { PayCurve::ZERO };
            rows.insert(symbol, materialize(&curve));
        }
        Self { rows }
    }

    /// Payout for a cluster of `size` cells, 0 outside 4..=25
    pub fn payout(&self, symbol: Symbol, size: u8) -> u32 {
        self.rows
            .get(&symbol)
            .and_then(|row| row.get(&size))
            .copied()
            .unwrap_or(0)
    }

    /// Full size → payout row for a symbol
    pub fn row(&self, symbol: Symbol) -> Option<&BTreeMap<u8, u32>> {
        self.rows.get(&symbol)
    }

    /// Symbols present in the table
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.rows.keys().copied()
    }
}

impl Default for ClusterPayTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn materialize(curve: &PayCurve) -> BTreeMap<u8, u32> {
    (MIN_CLUSTER..=MAX_CLUSTER)
        .map(|size| (size, curve.payout(size)))
        .collect()
}
