//! Outcome records and the final selectable table

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::GameMode;
use crate::grid::Grid;
use crate::paytable::ClusterPayTable;

/// Secondary feature flags carried by an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Triggers {
    /// Outcome also awards a pick bonus
    pub pick_bonus: bool,
}

/// One concrete, independently drawable game round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// `"{bucket}-{sample}"`, unique within the table
    pub id: String,
    /// Selection weight
    pub probability: f64,
    /// Game context
    pub mode: GameMode,
    /// Grid shown before any cascade
    pub initial_grid: Grid,
    /// Base win multiplier (fixed per mode)
    pub multiplier: u32,
    /// Seed of the cascade multiplier progression (fixed per mode)
    pub cascade_multiplier_base: u32,
    /// Scatter count that triggers free spins downstream
    pub free_spins_trigger_count: u8,
    /// Free spins granted by this outcome, 0 if not a trigger
    pub free_spins_award: u32,
    /// Secondary feature flags
    pub triggers: Triggers,
    /// Paytable shared by every outcome of the run
    pub pay_table: Arc<ClusterPayTable>,
}

impl Outcome {
    /// Name of the bucket this outcome was expanded from
    pub fn bucket_name(&self) -> &str {
        self.id
            .rsplit_once('-')
            .map(|(bucket, _)| bucket)
            .unwrap_or(&self.id)
    }

    /// Whether this outcome starts or extends free spins
    pub fn awards_free_spins(&self) -> bool {
        self.free_spins_award > 0
    }
}

/// Ordered, normalized outcome table.
///
/// Serializes as `{ "outcomes": [ ... ] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeTable {
    outcomes: Vec<Outcome>,
}

impl OutcomeTable {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<Outcome> {
        self.outcomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outcome> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Look up an outcome by id
    pub fn get(&self, id: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    /// Outcomes of one mode, in table order
    pub fn by_mode(&self, mode: GameMode) -> impl Iterator<Item = &Outcome> + '_ {
        self.outcomes.iter().filter(move |o| o.mode == mode)
    }

    /// Sum of all probabilities
    pub fn total_probability(&self) -> f64 {
        self.outcomes.iter().map(|o| o.probability).sum()
    }

    /// Probability mass held by one mode
    pub fn mode_mass(&self, mode: GameMode) -> f64 {
        self.by_mode(mode).map(|o| o.probability).sum()
    }

    /// Rescale every probability so the table sums to 1.0.
    ///
    /// Returns false and leaves the table untouched when the total is zero
    /// or not finite. Never adds or removes records.
    pub fn normalize(&mut self) -> bool {
        let total = self.total_probability();
        if !total.is_finite() || total <= 0.0 {
            return false;
        }
        for outcome in &mut self.outcomes {
            outcome.probability /= total;
        }
        true
    }

    /// Cumulative-weight draw restricted to one mode.
    ///
    /// `roll` is a uniform value in [0, 1), scaled by the pool's total
    /// weight. Falls back to the whole table when the mode has no
    /// outcomes; returns `None` only for an empty table.
    pub fn pick(&self, mode: GameMode, roll: f64) -> Option<&Outcome> {
        let pool: Vec<&Outcome> = if self.by_mode(mode).next().is_some() {
            self.by_mode(mode).collect()
        } else {
            self.outcomes.iter().collect()
        };

        let total: f64 = pool.iter().map(|o| o.probability).sum();
        let target = roll * total;
        let mut acc = 0.0;
        for outcome in &pool {
            acc += outcome.probability;
            if target <= acc {
                return Some(outcome);
            }
        }
        pool.last().copied()
    }
}

impl<'a> IntoIterator for &'a OutcomeTable {
    type Item = &'a Outcome;
    type IntoIter = std::slice::Iter<'a, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Symbol;
    use approx::assert_relative_eq;

    fn outcome(id: &str, mode: GameMode, probability: f64) -> Outcome {
        Outcome {
            id: id.to_string(),
            probability,
            mode,
            initial_grid: Grid::filled(Symbol::A),
            multiplier: mode.base_multiplier(),
            cascade_multiplier_base: mode.cascade_multiplier_base(),
            free_spins_trigger_count: 3,
            free_spins_award: 0,
            triggers: Triggers::default(),
            pay_table: Arc::new(ClusterPayTable::standard()),
        }
    }

    fn table() -> OutcomeTable {
        OutcomeTable::new(vec![
            outcome("BASE_A-0", GameMode::Base, 0.25),
            outcome("BASE_A-1", GameMode::Base, 0.25),
            outcome("FREE_A-0", GameMode::Free, 0.5),
            outcome("FREE_A-1", GameMode::Free, 0.5),
        ])
    }

    #[test]
    fn test_bucket_name() {
        assert_eq!(outcome("BASE_FREE-12", GameMode::Base, 0.1).bucket_name(), "BASE_FREE");
        assert_eq!(outcome("MY-BUCKET-3", GameMode::Base, 0.1).bucket_name(), "MY-BUCKET");
        assert_eq!(outcome("PLAIN", GameMode::Base, 0.1).bucket_name(), "PLAIN");
    }

    #[test]
    fn test_normalize() {
        let mut table = table();
        assert_relative_eq!(table.total_probability(), 1.5);

        assert!(table.normalize());
        assert_eq!(table.len(), 4);
        assert_relative_eq!(table.total_probability(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(table.get("BASE_A-0").unwrap().probability, 0.25 / 1.5);
        assert_relative_eq!(table.mode_mass(GameMode::Free), 1.0 / 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_degenerate_totals() {
        let mut empty = OutcomeTable::default();
        assert!(!empty.normalize());

        let mut zero = OutcomeTable::new(vec![outcome("X-0", GameMode::Base, 0.0)]);
        assert!(!zero.normalize());
        assert_eq!(zero.outcomes()[0].probability, 0.0);
    }

    #[test]
    fn test_pick_restricted_to_mode() {
        let table = table();
        assert_eq!(table.pick(GameMode::Base, 0.0).unwrap().id, "BASE_A-0");
        assert_eq!(table.pick(GameMode::Base, 0.49).unwrap().id, "BASE_A-0");
        assert_eq!(table.pick(GameMode::Base, 0.51).unwrap().id, "BASE_A-1");
        assert_eq!(table.pick(GameMode::Free, 0.99).unwrap().id, "FREE_A-1");
    }

    #[test]
    fn test_pick_falls_back_to_whole_table() {
        let table = OutcomeTable::new(vec![outcome("BASE_A-0", GameMode::Base, 1.0)]);
        assert_eq!(table.pick(GameMode::Free, 0.3).unwrap().id, "BASE_A-0");
        assert!(OutcomeTable::default().pick(GameMode::Base, 0.3).is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let mut outcome = outcome("BASE_PICK-0", GameMode::Base, 0.5);
        outcome.triggers.pick_bonus = true;
        let value = serde_json::to_value(&outcome).unwrap();

        for key in [
            "id",
            "probability",
            "mode",
            "initialGrid",
            "multiplier",
            "cascadeMultiplierBase",
            "freeSpinsTriggerCount",
            "freeSpinsAward",
            "triggers",
            "payTable",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["mode"], "BASE");
        assert_eq!(value["triggers"]["pickBonus"], true);
        assert_eq!(value["payTable"]["C"]["4"], 3);
    }

    #[test]
    fn test_table_document_shape() {
        let json = serde_json::to_string(&table()).unwrap();
        assert!(json.starts_with(r#"{"outcomes":["#));
        let back: OutcomeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 4);
    }
}
