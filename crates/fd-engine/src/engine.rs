//! Stateful formulation core.
//!
//! The engine owns an ordered list of ingredients, a container, and at most one fill
//! ingredient. Every mutating call validates first, applies, then runs a single
//! synchronous propagation pass that:
//!
//! 1. derives the filler's volume as `truncate_1dp(capacity - Σ others)`
//! 2. computes `free = capacity - Σ(non-fill volumes)`
//! 3. bounds every non-fill ingredient at `truncate_1dp(v + free)`, except the ingredient
//!    being edited, whose bound is left as it was
//! 4. collapses every displayed bound to `Full` when `free < 0.1`; the numeric bound then
//!    drops to the truncated current volume and no increase is accepted
//! 5. blends the result

use crate::bounds::{Bound, MaxVolume, Update, VolumeStatus};
use crate::config::FormulationConfig;
use crate::container::Container;
use crate::error::{EngineError, EngineResult};
use crate::snapshot::{IngredientDef, Snapshot};
use fd_core::IngredientId;
use fd_core::numeric::{VOLUME_RESOLUTION, truncate_1dp};
use fd_core::units::ml;
use fd_mix::{Ingredient, Mixture, blend};

/// Absolute slack when comparing a requested volume against a truncated bound.
const BOUND_EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
struct Slot {
    id: IngredientId,
    ingredient: Ingredient,
    /// Enforced numeric maximum from the last pass that did not exclude this slot.
    limit: f64,
    max: MaxVolume,
}

#[derive(Debug, Clone)]
pub struct FormulationEngine {
    config: FormulationConfig,
    container: Container,
    slots: Vec<Slot>,
    fill: Option<IngredientId>,
    next_seq: u32,
    name: String,
    notes: String,
}

impl FormulationEngine {
    /// Empty engine with the configured default container.
    pub fn new(config: FormulationConfig) -> EngineResult<Self> {
        let capacity = config.default_capacity;
        Self::with_capacity(config, capacity)
    }

    pub fn with_capacity(config: FormulationConfig, capacity: f64) -> EngineResult<Self> {
        config.validate()?;
        let container = Container::new(capacity, &config)?;
        let name = config.default_mixture_name.clone();
        Ok(Self {
            config,
            container,
            slots: Vec::new(),
            fill: None,
            next_seq: 0,
            name,
            notes: String::new(),
        })
    }

    /// Build an engine straight from a stored snapshot.
    pub fn from_snapshot(config: FormulationConfig, snapshot: &Snapshot) -> EngineResult<Self> {
        let mut engine = Self::new(config)?;
        engine.load(snapshot)?;
        Ok(engine)
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &FormulationConfig {
        &self.config
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn capacity(&self) -> f64 {
        self.container.capacity()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Ingredients in insertion order.
    pub fn ingredients(&self) -> impl Iterator<Item = (IngredientId, &Ingredient)> + '_ {
        self.slots.iter().map(|s| (s.id, &s.ingredient))
    }

    pub fn ids(&self) -> Vec<IngredientId> {
        self.slots.iter().map(|s| s.id).collect()
    }

    pub fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.slot(id).map(|s| &s.ingredient)
    }

    pub fn index_of(&self, id: IngredientId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    /// Id at a display position.
    pub fn id_at(&self, index: usize) -> Option<IngredientId> {
        self.slots.get(index).map(|s| s.id)
    }

    pub fn fill(&self) -> Option<IngredientId> {
        self.fill
    }

    pub fn fill_index(&self) -> Option<usize> {
        self.fill.and_then(|id| self.index_of(id))
    }

    pub fn max_volume(&self, id: IngredientId) -> Option<MaxVolume> {
        self.slot(id).map(|s| s.max)
    }

    /// Enforced numeric bound; `None` for unknown ids and for the filler.
    pub fn allowed_max(&self, id: IngredientId) -> Option<f64> {
        if self.fill == Some(id) {
            return None;
        }
        self.slot(id).map(|s| s.limit)
    }

    pub fn total_volume(&self) -> f64 {
        self.slots.iter().map(|s| s.ingredient.volume()).sum()
    }

    /// Capacity not taken by free (non-fill) ingredients.
    pub fn free_capacity(&self) -> f64 {
        self.capacity() - self.locked_volume()
    }

    /// Blend of the current ingredients, `None` when there is nothing to blend.
    pub fn blend(&self) -> Option<Mixture> {
        blend(self.slots.iter().map(|s| &s.ingredient))
    }

    pub fn status(&self) -> VolumeStatus {
        VolumeStatus {
            total: ml(self.total_volume()),
            capacity: self.container.volume(),
            full: self.fill.is_some() || self.free_capacity() < VOLUME_RESOLUTION,
        }
    }

    pub fn bounds(&self) -> Vec<Bound> {
        self.slots
            .iter()
            .map(|s| Bound {
                id: s.id,
                volume: s.ingredient.volume(),
                max: s.max,
            })
            .collect()
    }

    /// Current bounds, blend and status in one value.
    pub fn update(&self) -> Update {
        Update {
            bounds: self.bounds(),
            mixture: self.blend(),
            status: self.status(),
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Append an ingredient. Its volume must fit in the free capacity (the filler yields).
    pub fn add(&mut self, ingredient: Ingredient) -> EngineResult<(IngredientId, Update)> {
        let limit = self.config.max_ingredients;
        if self.slots.len() >= limit {
            return Err(EngineError::CapacityExceeded { limit });
        }

        let free = self.free_capacity();
        let volume = ingredient.volume();
        if volume > free + BOUND_EPS {
            return Err(EngineError::OutOfRange {
                what: "volume",
                value: volume,
                min: 0.0,
                max: truncate_1dp(free.max(0.0)),
            });
        }

        let id = self.allocate_id()?;
        let ingredient = self.named(ingredient);
        tracing::debug!(%id, name = ingredient.name(), volume, "add ingredient");
        self.slots.push(Slot {
            id,
            ingredient,
            limit: 0.0,
            max: MaxVolume::Full,
        });
        Ok((id, self.propagate(None)))
    }

    pub fn remove(&mut self, id: IngredientId) -> EngineResult<Update> {
        let index = self.index_of(id).ok_or(EngineError::NotFound { id })?;
        if self.fill == Some(id) {
            self.fill = None;
        }
        let slot = self.slots.remove(index);
        tracing::debug!(%id, name = slot.ingredient.name(), "remove ingredient");
        Ok(self.propagate(None))
    }

    /// Set a free ingredient's volume.
    ///
    /// Accepted when `0 <= volume <= allowed_max(id)`; lowering an ingredient is always
    /// accepted even if the truncated bound sits below its current volume.
    pub fn set_volume(&mut self, id: IngredientId, volume: f64) -> EngineResult<Update> {
        let index = self.editable_index(id)?;
        self.check_volume(index, volume)?;
        self.slots[index].ingredient.set_volume(volume)?;
        tracing::debug!(%id, volume, "set volume");
        Ok(self.propagate(Some(id)))
    }

    /// Designate, toggle or clear the fill ingredient.
    ///
    /// `Some(id)` on the current filler toggles it off and freezes its last derived volume.
    /// `Some(id)` on any other ingredient un-derives the previous filler and derives `id`.
    pub fn set_fill(&mut self, target: Option<IngredientId>) -> EngineResult<Update> {
        let next = match target {
            None => None,
            Some(id) => {
                if self.index_of(id).is_none() {
                    return Err(EngineError::NotFound { id });
                }
                if self.fill == Some(id) { None } else { Some(id) }
            }
        };
        tracing::debug!(previous = ?self.fill, next = ?next, "set fill");
        self.fill = next;
        Ok(self.propagate(None))
    }

    /// Resize the container, scaling every volume by `new / old`.
    pub fn resize_capacity(&mut self, capacity: f64) -> EngineResult<Update> {
        let mut container = self.container;
        let ratio = container.resize(capacity, &self.config)?;
        let scaled = self
            .slots
            .iter()
            .map(|s| s.ingredient.clone().with_volume(s.ingredient.volume() * ratio))
            .collect::<Result<Vec<_>, _>>()?;

        self.container = container;
        for (slot, ingredient) in self.slots.iter_mut().zip(scaled) {
            slot.ingredient = ingredient;
        }
        tracing::debug!(capacity, ratio, "resize container");
        Ok(self.propagate(None))
    }

    /// Replace an ingredient's name and properties.
    ///
    /// A positive volume on `replacement` is applied like `set_volume` unless the target is
    /// the filler; otherwise the current volume is kept.
    pub fn replace(&mut self, id: IngredientId, replacement: Ingredient) -> EngineResult<Update> {
        let index = self.index_of(id).ok_or(EngineError::NotFound { id })?;
        let volume = replacement.volume();
        let apply_volume = volume > 0.0 && self.fill != Some(id);
        if apply_volume {
            self.check_volume(index, volume)?;
        }

        let replacement = self.named(replacement);
        let slot = &mut self.slots[index];
        slot.ingredient.take_properties(&replacement);
        tracing::debug!(%id, name = replacement.name(), "replace ingredient");
        if apply_volume {
            slot.ingredient.set_volume(volume)?;
            Ok(self.propagate(Some(id)))
        } else {
            Ok(self.propagate(None))
        }
    }

    /// Rename the recipe. A blank name falls back to the configured default.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = self.mixture_name(name.into());
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn dump(&self) -> Snapshot {
        Snapshot {
            ingredients: self
                .slots
                .iter()
                .map(|s| IngredientDef::from_ingredient(&s.ingredient))
                .collect(),
            capacity: self.capacity(),
            fill_index: self.fill_index(),
            name: self.name.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Replace the whole state from a snapshot. Nothing changes unless every precondition holds.
    pub fn load(&mut self, snapshot: &Snapshot) -> EngineResult<Update> {
        let ingredients = match snapshot.validate(&self.config) {
            Ok(ingredients) => ingredients,
            Err(reason) => {
                tracing::warn!(name = %snapshot.name, %reason, "rejected snapshot");
                return Err(reason.into());
            }
        };
        let container = Container::new(snapshot.capacity, &self.config)?;

        let first = self.next_seq;
        let mut ids = Vec::with_capacity(ingredients.len());
        for offset in 0..ingredients.len() {
            let id = u32::try_from(offset)
                .ok()
                .and_then(|o| first.checked_add(o))
                .and_then(IngredientId::from_index)
                .ok_or(EngineError::CapacityExceeded {
                    limit: self.config.max_ingredients,
                })?;
            ids.push(id);
        }

        let slots: Vec<Slot> = ids
            .iter()
            .zip(ingredients)
            .map(|(&id, ingredient)| Slot {
                id,
                ingredient: self.named(ingredient),
                limit: 0.0,
                max: MaxVolume::Full,
            })
            .collect();

        self.next_seq = first + slots.len() as u32;
        self.fill = snapshot.fill_index.map(|index| ids[index]);
        self.slots = slots;
        self.container = container;
        self.name = self.mixture_name(snapshot.name.clone());
        self.notes = snapshot.notes.clone();
        tracing::debug!(name = %self.name, count = self.slots.len(), "load snapshot");
        Ok(self.propagate(None))
    }

    // ------------------------------------------------------------------
    // Propagation
    // ------------------------------------------------------------------

    /// Recompute the derived fill volume, every bound, and the blend.
    ///
    /// `exclude` names the ingredient currently being edited; its numeric bound is left
    /// untouched.
    fn propagate(&mut self, exclude: Option<IngredientId>) -> Update {
        let capacity = self.capacity();

        if let Some(fill_id) = self.fill {
            let others: f64 = self
                .slots
                .iter()
                .filter(|s| s.id != fill_id)
                .map(|s| s.ingredient.volume())
                .sum();
            let derived = truncate_1dp(capacity - others).max(0.0);
            if let Some(slot) = self.slots.iter_mut().find(|s| s.id == fill_id) {
                // finite and non-negative by construction
                let _ = slot.ingredient.set_volume(derived);
            }
        }

        let free = capacity - self.locked_volume();
        let full = free < VOLUME_RESOLUTION;
        for slot in &mut self.slots {
            if Some(slot.id) != exclude {
                let headroom = if full { 0.0 } else { free };
                slot.limit = truncate_1dp(slot.ingredient.volume() + headroom);
            }
            slot.max = if Some(slot.id) == self.fill {
                MaxVolume::Derived
            } else if full {
                MaxVolume::Full
            } else {
                MaxVolume::Limit(slot.limit)
            };
        }

        tracing::trace!(capacity, free, full, exclude = ?exclude, "propagate");
        self.update()
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn slot(&self, id: IngredientId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    fn locked_volume(&self) -> f64 {
        self.slots
            .iter()
            .filter(|s| Some(s.id) != self.fill)
            .map(|s| s.ingredient.volume())
            .sum()
    }

    fn editable_index(&self, id: IngredientId) -> EngineResult<usize> {
        let index = self.index_of(id).ok_or(EngineError::NotFound { id })?;
        if self.fill == Some(id) {
            return Err(EngineError::Derived { id });
        }
        Ok(index)
    }

    fn check_volume(&self, index: usize, volume: f64) -> EngineResult<()> {
        let slot = &self.slots[index];
        let current = slot.ingredient.volume();
        // no increase while the container is full, even against a kept bound
        let ceiling = if self.free_capacity() < VOLUME_RESOLUTION {
            current
        } else {
            slot.limit.max(current)
        };
        if !volume.is_finite() || volume < 0.0 || volume > ceiling + BOUND_EPS {
            return Err(EngineError::OutOfRange {
                what: "volume",
                value: volume,
                min: 0.0,
                max: ceiling,
            });
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> EngineResult<IngredientId> {
        let id = IngredientId::from_index(self.next_seq).ok_or(EngineError::CapacityExceeded {
            limit: self.config.max_ingredients,
        })?;
        self.next_seq += 1;
        Ok(id)
    }

    fn mixture_name(&self, name: String) -> String {
        if name.trim().is_empty() {
            self.config.default_mixture_name.clone()
        } else {
            name
        }
    }

    fn named(&self, ingredient: Ingredient) -> Ingredient {
        if ingredient.name().trim().is_empty() {
            ingredient.with_name(self.config.default_ingredient_name.clone())
        } else {
            ingredient
        }
    }
}
