//! A single liquid contributed to a mixture.

use crate::composition::Composition;
use crate::error::MixResult;
use fd_core::numeric::ensure_non_negative;

/// One liquid: name, intensive properties, and the volume it contributes.
///
/// Properties are fixed at construction; only the volume changes afterwards, and only
/// through [`Ingredient::set_volume`], which keeps it finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    name: String,
    composition: Composition,
    /// Potency per unit volume (e.g. nicotine, mg/ml).
    concentration: f64,
    /// Cost per unit volume.
    unit_cost: f64,
    /// Volume in the mixture (ml).
    volume: f64,
}

impl Ingredient {
    pub fn new(
        name: impl Into<String>,
        composition: Composition,
        concentration: f64,
        unit_cost: f64,
        volume: f64,
    ) -> MixResult<Self> {
        Ok(Self {
            name: name.into(),
            composition,
            concentration: ensure_non_negative(concentration, "concentration")?,
            unit_cost: ensure_non_negative(unit_cost, "unit cost")?,
            volume: ensure_non_negative(volume, "volume")?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn composition(&self) -> Composition {
        self.composition
    }

    pub fn primary(&self) -> f64 {
        self.composition.primary()
    }

    pub fn secondary(&self) -> f64 {
        self.composition.secondary()
    }

    pub fn concentration(&self) -> f64 {
        self.concentration
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f64) -> MixResult<()> {
        self.volume = ensure_non_negative(volume, "volume")?;
        Ok(())
    }

    /// Same liquid, different volume.
    pub fn with_volume(mut self, volume: f64) -> MixResult<Self> {
        self.set_volume(volume)?;
        Ok(self)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Copy name and intensive properties from `other`, keeping this ingredient's volume.
    pub fn take_properties(&mut self, other: &Ingredient) {
        self.name.clone_from(&other.name);
        self.composition = other.composition;
        self.concentration = other.concentration;
        self.unit_cost = other.unit_cost;
    }
}
