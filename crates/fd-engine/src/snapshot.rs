//! Serializable engine snapshot: the unit of persistence.

use crate::config::FormulationConfig;
use crate::error::SnapshotError;
use fd_core::numeric::VOLUME_SLACK;
use fd_mix::{Composition, Ingredient, MixResult, Mixture, blend};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientDef {
    pub name: String,
    pub primary_pct: f64,
    pub secondary_pct: f64,
    #[serde(default)]
    pub concentration: f64,
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default)]
    pub volume: f64,
}

impl IngredientDef {
    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name().to_string(),
            primary_pct: ingredient.primary(),
            secondary_pct: ingredient.secondary(),
            concentration: ingredient.concentration(),
            unit_cost: ingredient.unit_cost(),
            volume: ingredient.volume(),
        }
    }

    pub fn to_ingredient(&self) -> MixResult<Ingredient> {
        Ingredient::new(
            self.name.clone(),
            Composition::new(self.primary_pct, self.secondary_pct)?,
            self.concentration,
            self.unit_cost,
            self.volume,
        )
    }
}

/// Immutable copy of an engine's state.
///
/// Ingredient ids are not part of the snapshot; `load` hands out fresh ones in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub ingredients: Vec<IngredientDef>,
    pub capacity: f64,
    #[serde(default)]
    pub fill_index: Option<usize>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub notes: String,
}

impl Snapshot {
    pub fn total_volume(&self) -> f64 {
        self.ingredients.iter().map(|i| i.volume).sum()
    }

    pub fn to_ingredients(&self) -> Result<Vec<Ingredient>, SnapshotError> {
        self.ingredients
            .iter()
            .enumerate()
            .map(|(index, def)| {
                def.to_ingredient()
                    .map_err(|source| SnapshotError::InvalidIngredient { index, source })
            })
            .collect()
    }

    /// Check every load precondition, returning the decoded ingredients.
    pub fn validate(&self, config: &FormulationConfig) -> Result<Vec<Ingredient>, SnapshotError> {
        if !config.capacity_in_policy(self.capacity) {
            return Err(SnapshotError::CapacityOutOfRange {
                capacity: self.capacity,
                min: config.min_capacity,
                max: config.max_capacity,
            });
        }

        let count = self.ingredients.len();
        if count > config.max_ingredients {
            return Err(SnapshotError::CountOverLimit {
                count,
                limit: config.max_ingredients,
            });
        }

        if let Some(index) = self.fill_index
            && index >= count
        {
            return Err(SnapshotError::FillIndexOutOfRange { index, len: count });
        }

        let ingredients = self.to_ingredients()?;

        let total = self.total_volume();
        if total > self.capacity + VOLUME_SLACK {
            return Err(SnapshotError::VolumeOverCapacity {
                total,
                capacity: self.capacity,
            });
        }

        Ok(ingredients)
    }

    /// Blend the stored ingredients without building an engine.
    pub fn mixture(&self) -> Result<Option<Mixture>, SnapshotError> {
        let ingredients = self.to_ingredients()?;
        Ok(blend(&ingredients))
    }
}
