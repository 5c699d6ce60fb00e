//! # rf-slot-math — Outcome table generator for cluster-pay slot math
//!
//! Builds an offline, probability-weighted table of concrete game rounds
//! for a 5×5 cluster-pay game. The presentation engine replays rows from
//! this table instead of evaluating reels at runtime.
//!
//! ## Pipeline
//!
//! ```text
//! BucketCatalog (BASE)   BucketCatalog (FREE)
//!        │                      │
//!        └──────────┬───────────┘
//!                   v
//!          OutcomeGenerator ── ChaCha8Rng (one seeded stream)
//!            ├── GridSynthesizer (weighted draw + exact scatters)
//!            └── ClusterPayTable (shared by every outcome)
//!                   │
//!                   v
//!           OutcomeTable (normalized to 1.0)
//!                   │
//!                   v
//!           OutcomeExporter → outcomes.json + outcomes_summary.csv
//! ```
//!
//! Bucket masses and expected returns are illustrative design inputs;
//! the generator preserves their proportions but does not solve for RTP.

pub mod bucket;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod outcome;
pub mod parser;
pub mod paytable;
pub mod symbols;

pub use bucket::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use generator::*;
pub use grid::*;
pub use outcome::*;
pub use parser::*;
pub use paytable::*;
pub use symbols::*;

use std::path::Path;

/// Generate the default table: default config, default catalogs, seed 42
pub fn generate() -> Result<OutcomeTable> {
    Ok(GenerationPlan::default().generate()?)
}

/// Generate a table from a plan and export it into `out_dir`
pub fn run_plan(
    plan: &GenerationPlan,
    out_dir: impl AsRef<Path>,
) -> Result<(OutcomeTable, ExportReport)> {
    let table = plan.generate()?;
    let report = OutcomeExporter::new(out_dir.as_ref()).export(&table)?;
    Ok((table, report))
}
