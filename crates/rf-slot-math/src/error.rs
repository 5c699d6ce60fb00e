//! Error types for rf-slot-math

use thiserror::Error;

use crate::config::GameMode;

/// Bucket catalog and weight validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("{0} catalog has no buckets")]
    EmptyCatalog(GameMode),

    #[error("Duplicate bucket name: {0}")]
    DuplicateBucket(String),

    #[error("Bucket {name} has invalid mass {mass}")]
    InvalidMass { name: String, mass: f64 },

    #[error("Bucket {name} requests {count} scatters on a {capacity}-cell grid")]
    ScatterOutOfRange {
        name: String,
        count: u8,
        capacity: usize,
    },

    #[error("{mode} bucket masses sum to {total}, expected 1.0 (tolerance {tolerance})")]
    MassMismatch {
        mode: GameMode,
        total: f64,
        tolerance: f64,
    },

    #[error("Invalid symbol weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),
}

/// Catalog document parsing errors
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("YAML parse error: {0}")]
    Yaml(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum SlotMathError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SlotMathError>;
