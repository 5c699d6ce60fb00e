//! Catalog Parser — load bucket catalogs and generator config from JSON or YAML
//!
//! A catalog document overrides any subset of the built-in setup:
//!
//! ```yaml
//! config:
//!   seed: 7
//!   samples_per_bucket: 20
//! base:
//!   - { name: BASE_NOWIN, mass: 0.6 }
//!   - { name: BASE_WIN, mass: 0.39, expectedReturn: 1.5 }
//!   - name: BASE_FREE
//!     mass: 0.01
//!     expectedReturn: 12.0
//!     flags: { scatterCount: 3, freeSpinsAward: 8 }
//! ```
//!
//! Omitted sections fall back to the defaults. Bucket keys are camelCase,
//! matching the exported records; snake_case spellings are also accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bucket::{Bucket, BucketCatalog};
use crate::config::{GameMode, GeneratorConfig};
use crate::error::{CatalogError, ParseError};
use crate::generator::OutcomeGenerator;
use crate::outcome::OutcomeTable;

/// Catalog parser
pub struct CatalogParser {
    /// Validation limits
    pub limits: CatalogLimits,
    /// Accept mass drift regardless of the document setting
    pub force_lenient: bool,
}

/// Parsing limits
#[derive(Debug, Clone)]
pub struct CatalogLimits {
    pub max_buckets: usize,
    pub max_name_length: usize,
    pub max_samples_per_bucket: usize,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            max_buckets: 64,
            max_name_length: 64,
            max_samples_per_bucket: 10_000,
        }
    }
}

impl CatalogParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self {
            limits: CatalogLimits::default(),
            force_lenient: false,
        }
    }

    /// Create parser with custom limits
    pub fn with_limits(limits: CatalogLimits) -> Self {
        Self {
            limits,
            force_lenient: false,
        }
    }

    /// Tolerate bucket mass drift for every parsed document
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.force_lenient = lenient;
        self
    }

    /// Parse a JSON catalog document
    pub fn parse_json(&self, json: &str) -> Result<GenerationPlan, ParseError> {
        let doc: CatalogDocument =
            serde_json::from_str(json).map_err(|e| ParseError::Json(e.to_string()))?;
        self.to_plan(doc)
    }

    /// Parse a YAML catalog document
    pub fn parse_yaml(&self, yaml: &str) -> Result<GenerationPlan, ParseError> {
        let doc: CatalogDocument =
            serde_yml::from_str(yaml).map_err(|e| ParseError::Yaml(e.to_string()))?;
        self.to_plan(doc)
    }

    /// Parse a file, YAML for `.yaml`/`.yml`, JSON otherwise
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<GenerationPlan, ParseError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        log::debug!(
            "Parsing catalog {} as {}",
            path.display(),
            if is_yaml { "YAML" } else { "JSON" }
        );
        if is_yaml {
            self.parse_yaml(&text)
        } else {
            self.parse_json(&text)
        }
    }

    /// Validate document limits
    pub fn validate(&self, doc: &CatalogDocument) -> Result<(), ParseError> {
        if let Some(config) = &doc.config {
            self.check_samples(config.samples_per_bucket)?;
        }

        for (mode, buckets) in [(GameMode::Base, &doc.base), (GameMode::Free, &doc.free)] {
            let Some(buckets) = buckets else { continue };
            if buckets.len() > self.limits.max_buckets {
                return Err(ParseError::Validation(format!(
                    "Too many {} buckets: {} > {}",
                    mode,
                    buckets.len(),
                    self.limits.max_buckets
                )));
            }
            for bucket in buckets {
                if bucket.name.is_empty() || bucket.name.len() > self.limits.max_name_length {
                    return Err(ParseError::Validation(format!(
                        "Bucket name length {} outside 1..={}",
                        bucket.name.len(),
                        self.limits.max_name_length
                    )));
                }
            }
        }

        Ok(())
    }

    fn to_plan(&self, doc: CatalogDocument) -> Result<GenerationPlan, ParseError> {
        self.validate(&doc)?;

        let config = doc.config.unwrap_or_default();
        config.validate()?;

        let lenient = self.force_lenient || doc.lenient;
        let build = |mode: GameMode, buckets: Option<Vec<Bucket>>| match buckets {
            Some(buckets) if lenient => {
                BucketCatalog::lenient(mode, buckets, config.mass_tolerance)
            }
            Some(buckets) => BucketCatalog::new(mode, buckets, config.mass_tolerance),
            None => Ok(BucketCatalog::default_for(mode)),
        };

        let base = build(GameMode::Base, doc.base)?;
        let free = build(GameMode::Free, doc.free)?;

        Ok(GenerationPlan::new(config, base, free)?)
    }

    /// Apply command-line overrides to a plan, holding them to the same limits
    /// as document values
    pub fn apply_overrides(
        &self,
        plan: &mut GenerationPlan,
        seed: Option<u64>,
        samples: Option<usize>,
    ) -> Result<(), ParseError> {
        let mut config = plan.config.clone();
        if let Some(samples) = samples {
            self.check_samples(samples)?;
            config.samples_per_bucket = samples;
        }
        if let Some(seed) = seed {
            config.seed = seed;
        }
        config.validate()?;

        plan.config = config;
        Ok(())
    }

    fn check_samples(&self, samples: usize) -> Result<(), ParseError> {
        if samples > self.limits.max_samples_per_bucket {
            return Err(ParseError::Validation(format!(
                "Too many samples per bucket: {} > {}",
                samples, self.limits.max_samples_per_bucket
            )));
        }
        Ok(())
    }
}

impl Default for CatalogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Catalog document structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Generator config overrides
    #[serde(default)]
    pub config: Option<GeneratorConfig>,
    /// Base game buckets (defaults if omitted)
    #[serde(default)]
    pub base: Option<Vec<Bucket>>,
    /// Free spins buckets (defaults if omitted)
    #[serde(default)]
    pub free: Option<Vec<Bucket>>,
    /// Log mass drift instead of rejecting it
    #[serde(default)]
    pub lenient: bool,
}

/// Everything a generation run needs
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub config: GeneratorConfig,
    pub base: BucketCatalog,
    pub free: BucketCatalog,
}

impl GenerationPlan {
    /// Build a plan, rejecting bucket names shared by the two catalogs
    pub fn new(
        config: GeneratorConfig,
        base: BucketCatalog,
        free: BucketCatalog,
    ) -> Result<Self, CatalogError> {
        let plan = Self { config, base, free };
        plan.check_disjoint()?;
        Ok(plan)
    }

    /// Outcome ids are `{bucket}-{sample}`, so a name may appear in one mode only
    pub fn check_disjoint(&self) -> Result<(), CatalogError> {
        match self.base.iter().find(|b| self.free.get(&b.name).is_some()) {
            Some(bucket) => Err(CatalogError::DuplicateBucket(bucket.name.clone())),
            None => Ok(()),
        }
    }

    /// Run the plan on a fresh generator
    pub fn generate(&self) -> Result<OutcomeTable, CatalogError> {
        self.check_disjoint()?;
        let mut generator = OutcomeGenerator::new(self.config.clone())?;
        Ok(generator.generate(&self.base, &self.free))
    }

    /// Catalog for a mode
    pub fn catalog(&self, mode: GameMode) -> &BucketCatalog {
        match mode {
            GameMode::Base => &self.base,
            GameMode::Free => &self.free,
        }
    }
}

impl Default for GenerationPlan {
    fn default() -> Self {
        Self {
            config: GeneratorConfig::default(),
            base: BucketCatalog::base_default(),
            free: BucketCatalog::free_default(),
        }
    }
}
