//! Two-part liquid composition with an implicit water remainder.

use crate::error::{MixError, MixResult};
use fd_core::numeric::ensure_non_negative;

/// Slack on the `primary + secondary <= 100` check so that values read back from
/// decimal text are not rejected over the last bit.
const PERCENT_SLACK: f64 = 1e-9;

/// Volume percentages of the two named carriers (e.g. PG and VG).
///
/// Whatever is left up to 100% is water.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Composition {
    primary: f64,
    secondary: f64,
}

impl Composition {
    /// Create a composition from two percentages.
    ///
    /// Both must be finite and non-negative and together not exceed 100.
    pub fn new(primary: f64, secondary: f64) -> MixResult<Self> {
        let primary = ensure_non_negative(primary, "primary percentage")?;
        let secondary = ensure_non_negative(secondary, "secondary percentage")?;
        if primary + secondary > 100.0 + PERCENT_SLACK {
            return Err(MixError::CompositionOverflow { primary, secondary });
        }
        Ok(Self { primary, secondary })
    }

    /// Pure water (0/0).
    pub fn water_only() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> f64 {
        self.primary
    }

    pub fn secondary(&self) -> f64 {
        self.secondary
    }

    /// Implicit diluent percentage.
    pub fn water(&self) -> f64 {
        (100.0 - self.primary - self.secondary).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_is_remainder() {
        let comp = Composition::new(30.0, 60.0).unwrap();
        assert_eq!(comp.water(), 10.0);
        assert_eq!(Composition::water_only().water(), 100.0);
    }

    #[test]
    fn full_split_is_allowed() {
        let comp = Composition::new(100.0, 0.0).unwrap();
        assert_eq!(comp.water(), 0.0);
        assert!(Composition::new(50.0, 50.0).is_ok());
    }

    #[test]
    fn overflow_rejected() {
        let result = Composition::new(70.0, 40.0);
        assert!(matches!(
            result,
            Err(MixError::CompositionOverflow { .. })
        ));
    }

    #[test]
    fn negative_rejected() {
        assert!(Composition::new(-1.0, 50.0).is_err());
        assert!(Composition::new(50.0, -0.1).is_err());
    }

    #[test]
    fn non_finite_rejected() {
        assert!(Composition::new(f64::NAN, 0.0).is_err());
        assert!(Composition::new(0.0, f64::INFINITY).is_err());
    }
}
