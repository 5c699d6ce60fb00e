//! Generator configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::symbols::SymbolWeights;

/// Game context an outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameMode {
    /// Regular paid spin
    Base,
    /// Spin inside the free spins feature
    Free,
}

impl GameMode {
    /// Base win multiplier for every outcome in this mode
    pub const fn base_multiplier(self) -> u32 {
        match self {
            GameMode::Base => 1,
            GameMode::Free => 2,
        }
    }

    /// Starting value of the cascade multiplier progression
    pub const fn cascade_multiplier_base(self) -> u32 {
        match self {
            GameMode::Base => 1,
            GameMode::Free => 2,
        }
    }

    /// Upper-case tag used in exports
    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::Base => "BASE",
            GameMode::Free => "FREE",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome generator configuration
///
/// Every field has a default, so a partial document only overrides the
/// keys it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the single RNG stream of a run
    pub seed: u64,
    /// Concrete outcomes produced per bucket
    pub samples_per_bucket: usize,
    /// Scatter count that triggers free spins downstream (metadata only)
    pub free_spins_trigger_count: u8,
    /// Allowed deviation of a catalog's total mass from 1.0
    pub mass_tolerance: f64,
    /// Non-scatter draw distribution
    pub symbol_weights: SymbolWeights,
}

impl GeneratorConfig {
    /// Default seed
    pub const DEFAULT_SEED: u64 = 42;
    /// Default samples per bucket
    pub const DEFAULT_SAMPLES: usize = 40;

    /// Same config with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Same config with a different sample count
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples_per_bucket = samples;
        self
    }

    /// Validate values the generator relies on
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.samples_per_bucket == 0 {
            return Err(CatalogError::InvalidConfig(
                "samples_per_bucket must be at least 1".into(),
            ));
        }
        if !self.mass_tolerance.is_finite() || self.mass_tolerance < 0.0 {
            return Err(CatalogError::InvalidConfig(format!(
                "mass_tolerance must be a non-negative number, got {}",
                self.mass_tolerance
            )));
        }
        self.symbol_weights.validate()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            samples_per_bucket: Self::DEFAULT_SAMPLES,
            free_spins_trigger_count: 3,
            mass_tolerance: 1e-9,
            symbol_weights: SymbolWeights::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_constants() {
        assert_eq!(GameMode::Base.base_multiplier(), 1);
        assert_eq!(GameMode::Free.base_multiplier(), 2);
        assert_eq!(GameMode::Base.cascade_multiplier_base(), 1);
        assert_eq!(GameMode::Free.cascade_multiplier_base(), 2);
        assert_eq!(GameMode::Free.to_string(), "FREE");
        assert_eq!(serde_json::to_string(&GameMode::Base).unwrap(), r#""BASE""#);
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.samples_per_bucket, 40);
        assert_eq!(config.free_spins_trigger_count, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_document() {
        let config: GeneratorConfig = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.samples_per_bucket, 40);
    }

    #[test]
    fn test_invalid_config() {
        let config = GeneratorConfig::default().with_samples(0);
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.mass_tolerance = f64::NAN;
        assert!(config.validate().is_err());
    }
}
