//! Recipe storage API.
//!
//! One JSON document per key under the root directory. Keys are generated on insert
//! and are plain file stems.

use crate::types::{RecipeKey, StoredRecipe};
use crate::{StoreError, StoreResult};
use fd_engine::{FormulationConfig, Snapshot};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct RecipeStore {
    root_dir: PathBuf,
    config: FormulationConfig,
}

impl RecipeStore {
    pub fn new(root_dir: PathBuf, config: FormulationConfig) -> StoreResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir, config })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn config(&self) -> &FormulationConfig {
        &self.config
    }

    fn document_path(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root_dir.join(format!("{key}.json")))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.document_path(key).is_ok_and(|path| path.exists())
    }

    /// Save a new recipe under a freshly generated key.
    pub fn insert(&self, snapshot: &Snapshot) -> StoreResult<RecipeKey> {
        snapshot.validate(&self.config)?;
        let key = uuid::Uuid::new_v4().to_string();
        self.write(&key, snapshot)?;
        tracing::debug!(%key, name = %snapshot.name, "inserted recipe");
        Ok(key)
    }

    /// Overwrite an existing recipe.
    pub fn put(&self, key: &str, snapshot: &Snapshot) -> StoreResult<()> {
        if !self.document_path(key)?.exists() {
            return Err(StoreError::NotFound {
                key: key.to_string(),
            });
        }
        snapshot.validate(&self.config)?;
        self.write(key, snapshot)?;
        tracing::debug!(%key, name = %snapshot.name, "updated recipe");
        Ok(())
    }

    fn write(&self, key: &str, snapshot: &Snapshot) -> StoreResult<()> {
        let path = self.document_path(key)?;
        let record = StoredRecipe {
            key: key.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339(),
            snapshot: snapshot.clone(),
        };
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> StoreResult<StoredRecipe> {
        let path = self.document_path(key)?;

        if !path.exists() {
            return Err(StoreError::NotFound {
                key: key.to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let record = serde_json::from_str(&content)?;
        Ok(record)
    }

    /// All readable recipes, ordered by name then key.
    pub fn list(&self) -> StoreResult<Vec<StoredRecipe>> {
        let mut recipes = Vec::new();

        if !self.root_dir.exists() {
            return Ok(recipes);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.get(key) {
                Ok(record) => recipes.push(record),
                Err(err) => tracing::warn!(path = %path.display(), %err, "skipping unreadable recipe"),
            }
        }

        recipes.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.key.cmp(&b.key)));
        Ok(recipes)
    }

    pub fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.document_path(key)?;
        if !path.exists() {
            return Err(StoreError::NotFound {
                key: key.to_string(),
            });
        }
        fs::remove_file(path)?;
        tracing::debug!(%key, "removed recipe");
        Ok(())
    }
}

fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_validation() {
        assert!(validate_key("0b6f6a52-2b1e-4c55-8d3e-1f0a9d7e4c21").is_ok());
        assert!(validate_key("house_mix").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a.json").is_err());
    }
}
