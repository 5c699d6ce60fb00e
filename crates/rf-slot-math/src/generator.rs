//! Outcome Generator — bucket expansion and probability normalization

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bucket::{Bucket, BucketCatalog};
use crate::config::{GameMode, GeneratorConfig};
use crate::error::CatalogError;
use crate::grid::GridSynthesizer;
use crate::outcome::{Outcome, OutcomeTable, Triggers};
use crate::paytable::ClusterPayTable;

/// Expands bucket catalogs into a normalized outcome table.
///
/// Owns the run's single RNG stream. Every grid draw consumes from it in
/// bucket order, then sample order, so two generators built from the same
/// config produce identical tables.
#[derive(Debug, Clone)]
pub struct OutcomeGenerator {
    /// Configuration
    config: GeneratorConfig,
    /// Random number generator, seeded once
    rng: ChaCha8Rng,
    /// Grid synthesizer
    synthesizer: GridSynthesizer,
    /// Paytable shared by every outcome
    pay_table: Arc<ClusterPayTable>,
}

impl OutcomeGenerator {
    /// Create a generator with the standard paytable
    pub fn new(config: GeneratorConfig) -> Result<Self, CatalogError> {
        Self::with_pay_table(config, ClusterPayTable::standard())
    }

    /// Create a generator with a specific paytable
    pub fn with_pay_table(
        config: GeneratorConfig,
        pay_table: ClusterPayTable,
    ) -> Result<Self, CatalogError> {
        config.validate()?;
        let synthesizer = GridSynthesizer::new(&config.symbol_weights)?;

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            synthesizer,
            pay_table: Arc::new(pay_table),
        })
    }

    /// Get current config
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Paytable embedded in every outcome
    pub fn pay_table(&self) -> &Arc<ClusterPayTable> {
        &self.pay_table
    }

    /// Expand a catalog into `samples_per_bucket` outcomes per bucket.
    ///
    /// Each outcome of a bucket gets `mass / samples_per_bucket`, so the
    /// bucket's aggregate mass is preserved before normalization.
    pub fn expand(&mut self, catalog: &BucketCatalog) -> Vec<Outcome> {
        let samples = self.config.samples_per_bucket;
        let mut outcomes = Vec::with_capacity(catalog.len() * samples);

        for bucket in catalog {
            let before = outcomes.len();
            self.expand_bucket(bucket, catalog.mode(), &mut outcomes);
            log::debug!(
                "Expanded {} into {} outcomes ({} scatters, {} free spins, pick bonus: {})",
                bucket.name,
                outcomes.len() - before,
                bucket.flags.scatter_count,
                bucket.flags.free_spins_award,
                bucket.flags.pick_bonus
            );
        }

        outcomes
    }

    fn expand_bucket(&mut self, bucket: &Bucket, mode: GameMode, out: &mut Vec<Outcome>) {
        let samples = self.config.samples_per_bucket;
        let probability = bucket.mass / samples as f64;

        for i in 0..samples {
            let initial_grid = self
                .synthesizer
                .synthesize(&mut self.rng, bucket.flags.scatter_count, mode);

            out.push(Outcome {
                id: format!("{}-{}", bucket.name, i),
                probability,
                mode,
                initial_grid,
                multiplier: mode.base_multiplier(),
                cascade_multiplier_base: mode.cascade_multiplier_base(),
                free_spins_trigger_count: self.config.free_spins_trigger_count,
                free_spins_award: bucket.flags.free_spins_award,
                triggers: Triggers {
                    pick_bonus: bucket.flags.pick_bonus,
                },
                pay_table: Arc::clone(&self.pay_table),
            });
        }
    }

    /// Expand base then free catalogs and normalize the combined table
    pub fn generate(&mut self, base: &BucketCatalog, free: &BucketCatalog) -> OutcomeTable {
        let mut outcomes = self.expand(base);
        outcomes.extend(self.expand(free));

        let mut table = OutcomeTable::new(outcomes);
        let raw_total = table.total_probability();
        if !table.normalize() {
            log::warn!("Outcome table has no probability mass; left unnormalized");
        }

        log::info!(
            "Generated {} outcomes (seed {}, {} per bucket); raw mass {:.6} normalized to {:.12}",
            table.len(),
            self.config.seed,
            self.config.samples_per_bucket,
            raw_total,
            table.total_probability()
        );
        log::info!(
            "Mode mass: BASE {:.6}, FREE {:.6}",
            table.mode_mass(GameMode::Base),
            table.mode_mass(GameMode::Free)
        );

        table
    }
}
