//! Volume-weighted blending.
//!
//! For ingredients with volumes v_i the mixture is:
//!
//! - total = Σ v_i
//! - p = Σ(v_i · p_i) / total, likewise for every intensive property
//!
//! Two edge cases are policy, not accident:
//! - no ingredients, or a zero total volume, is "no mixture" (`None`)
//! - exactly one ingredient passes its own properties through untouched, so a lone
//!   liquid never picks up float noise from the weighted formula

use crate::ingredient::Ingredient;
use core::fmt;

/// Aggregate properties of a blend. Always recomputed, never stored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mixture {
    pub primary_pct: f64,
    pub secondary_pct: f64,
    pub concentration: f64,
    /// Cost of the blended liquid per unit volume.
    pub unit_cost: f64,
    pub total_volume: f64,
}

impl Mixture {
    /// The all-zero mixture of nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Properties of a single ingredient, unchanged.
    pub fn of(ingredient: &Ingredient) -> Self {
        Self {
            primary_pct: ingredient.primary(),
            secondary_pct: ingredient.secondary(),
            concentration: ingredient.concentration(),
            unit_cost: ingredient.unit_cost(),
            total_volume: ingredient.volume(),
        }
    }

    pub fn water_pct(&self) -> f64 {
        (100.0 - self.primary_pct - self.secondary_pct).max(0.0)
    }

    /// Cost of the whole batch.
    pub fn total_cost(&self) -> f64 {
        self.unit_cost * self.total_volume
    }

    /// Short human-readable summary, e.g. `55PG / 45VG, nic. 1.0 mg/ml`.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Mixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Percentages truncate to whole numbers the way the mixer status bar shows them.
        write!(
            f,
            "{}PG / {}VG, nic. {:.1} mg/ml",
            self.primary_pct.trunc() as i64,
            self.secondary_pct.trunc() as i64,
            self.concentration
        )
    }
}

#[derive(Default)]
struct Accumulator {
    volume: f64,
    primary: f64,
    secondary: f64,
    concentration: f64,
    cost: f64,
}

impl Accumulator {
    fn add(&mut self, ingredient: &Ingredient) {
        let v = ingredient.volume();
        self.volume += v;
        self.primary += v * ingredient.primary();
        self.secondary += v * ingredient.secondary();
        self.concentration += v * ingredient.concentration();
        self.cost += v * ingredient.unit_cost();
    }

    fn finish(self) -> Option<Mixture> {
        if self.volume <= 0.0 {
            return None;
        }
        Some(Mixture {
            primary_pct: self.primary / self.volume,
            secondary_pct: self.secondary / self.volume,
            concentration: self.concentration / self.volume,
            unit_cost: self.cost / self.volume,
            total_volume: self.volume,
        })
    }
}

/// Blend an ordered collection of ingredients.
///
/// Returns `None` when there is nothing to blend (no ingredients, or more than one
/// ingredient with a zero total volume).
pub fn blend<'a, I>(ingredients: I) -> Option<Mixture>
where
    I: IntoIterator<Item = &'a Ingredient>,
{
    let mut iter = ingredients.into_iter();
    let first = iter.next()?;
    let Some(second) = iter.next() else {
        return Some(Mixture::of(first));
    };

    let mut acc = Accumulator::default();
    acc.add(first);
    acc.add(second);
    for ingredient in iter {
        acc.add(ingredient);
    }
    acc.finish()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::composition::Composition;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn blend_stays_within_member_range(
            parts in prop::collection::vec((0.0_f64..=100.0, 0.0_f64..50.0, 0.1_f64..100.0), 2..8)
        ) {
            let ingredients: Vec<Ingredient> = parts
                .iter()
                .map(|&(pg, nic, ml)| {
                    Ingredient::new("x", Composition::new(pg, 100.0 - pg).unwrap(), nic, 0.0, ml)
                        .unwrap()
                })
                .collect();
            let mixture = blend(&ingredients).unwrap();

            let min_nic = parts.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
            let max_nic = parts.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(mixture.concentration >= min_nic - 1e-9);
            prop_assert!(mixture.concentration <= max_nic + 1e-9);
            prop_assert!((mixture.primary_pct + mixture.secondary_pct - 100.0).abs() < 1e-6);
        }
    }
}
