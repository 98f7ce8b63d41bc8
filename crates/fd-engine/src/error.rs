//! Error types for the formulation engine.

use crate::config::ConfigError;
use fd_core::IngredientId;
use fd_mix::MixError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Every failure is raised at the offending call and leaves the engine untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Value outside the configured policy or the computed bound.
    #[error("{what} out of range: {value} (allowed {min}..={max})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Unknown ingredient id.
    #[error("Ingredient not found: {id}")]
    NotFound { id: IngredientId },

    /// Attempt to assign a value the engine derives itself.
    #[error("Volume of {id} is derived from the container fill and cannot be set")]
    Derived { id: IngredientId },

    /// Structural limit on the ingredient count.
    #[error("Ingredient limit reached ({limit})")]
    CapacityExceeded { limit: usize },

    /// Snapshot failed a load precondition.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    /// Ingredient value rejected.
    #[error("Invalid ingredient: {0}")]
    Ingredient(#[from] MixError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Reason a snapshot was refused by `load`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("ingredient volumes ({total} ml) exceed container capacity ({capacity} ml)")]
    VolumeOverCapacity { total: f64, capacity: f64 },

    #[error("{count} ingredients exceed the limit of {limit}")]
    CountOverLimit { count: usize, limit: usize },

    #[error("capacity {capacity} ml outside {min}..={max} ml")]
    CapacityOutOfRange { capacity: f64, min: f64, max: f64 },

    #[error("fill index {index} out of bounds for {len} ingredients")]
    FillIndexOutOfRange { index: usize, len: usize },

    #[error("ingredient {index}: {source}")]
    InvalidIngredient { index: usize, source: MixError },
}
