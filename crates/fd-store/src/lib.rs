//! fd-store: key-indexed library of saved mixtures.

pub mod store;
pub mod types;

pub use store::RecipeStore;
pub use types::*;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Recipe not found: {key}")]
    NotFound { key: String },

    #[error("Invalid key: {key:?}")]
    InvalidKey { key: String },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] fd_engine::SnapshotError),
}
