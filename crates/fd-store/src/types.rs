//! Stored document types.

use fd_engine::Snapshot;
use serde::{Deserialize, Serialize};

pub type RecipeKey = String;

/// One saved mixture as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecipe {
    pub key: RecipeKey,
    /// RFC 3339 timestamp of the last write.
    pub saved_at: String,
    pub snapshot: Snapshot,
}

impl StoredRecipe {
    pub fn name(&self) -> &str {
        &self.snapshot.name
    }
}
