//! The vessel the mixture is built in.

use crate::config::FormulationConfig;
use crate::error::{EngineError, EngineResult};
use fd_core::units::{Volume, ml};

/// Fixed-capacity container. Capacity always lies within the configured policy range.
///
/// The capacity is kept in millilitres as entered so that snapshots round-trip exactly;
/// [`Container::volume`] gives the unit-typed view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    capacity_ml: f64,
}

impl Container {
    pub fn new(capacity_ml: f64, config: &FormulationConfig) -> EngineResult<Self> {
        let capacity_ml = check_capacity(capacity_ml, config)?;
        Ok(Self { capacity_ml })
    }

    /// Capacity in millilitres.
    pub fn capacity(&self) -> f64 {
        self.capacity_ml
    }

    pub fn volume(&self) -> Volume {
        ml(self.capacity_ml)
    }

    /// Change the capacity, returning the `new / old` scale factor.
    pub fn resize(&mut self, capacity_ml: f64, config: &FormulationConfig) -> EngineResult<f64> {
        let capacity_ml = check_capacity(capacity_ml, config)?;
        let ratio = capacity_ml / self.capacity_ml;
        self.capacity_ml = capacity_ml;
        Ok(ratio)
    }
}

fn check_capacity(capacity_ml: f64, config: &FormulationConfig) -> EngineResult<f64> {
    if config.capacity_in_policy(capacity_ml) {
        Ok(capacity_ml)
    } else {
        Err(EngineError::OutOfRange {
            what: "capacity",
            value: capacity_ml,
            min: config.min_capacity,
            max: config.max_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_reports_ratio() {
        let config = FormulationConfig::default();
        let mut container = Container::new(50.0, &config).unwrap();
        let ratio = container.resize(200.0, &config).unwrap();
        assert!((ratio - 4.0).abs() < 1e-12);
        assert_eq!(container.capacity(), 200.0);
    }

    #[test]
    fn volume_view_is_unit_typed() {
        use fd_core::units::to_ml;
        let config = FormulationConfig::default();
        let container = Container::new(250.0, &config).unwrap();
        assert!((to_ml(container.volume()) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn policy_bounds_enforced() {
        let config = FormulationConfig::default();
        assert!(Container::new(9.9, &config).is_err());
        assert!(Container::new(10_000.1, &config).is_err());
        assert!(Container::new(f64::NAN, &config).is_err());
        assert!(Container::new(10.0, &config).is_ok());
        assert!(Container::new(10_000.0, &config).is_ok());
    }

    #[test]
    fn failed_resize_keeps_capacity() {
        let config = FormulationConfig::default();
        let mut container = Container::new(100.0, &config).unwrap();
        let err = container.resize(1.0, &config).unwrap_err();
        assert!(matches!(err, EngineError::OutOfRange { what: "capacity", .. }));
        assert_eq!(container.capacity(), 100.0);
    }
}
