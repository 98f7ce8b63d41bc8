//! Per-ingredient bounds and the result handed back after each mutation.

use core::fmt;
use fd_core::IngredientId;
use fd_core::units::{Volume, to_ml};
use fd_mix::Mixture;

/// Largest volume an ingredient may currently take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaxVolume {
    /// Truncated numeric bound (ml).
    Limit(f64),
    /// Free capacity is below the 0.1 ml resolution; no increase is accepted.
    Full,
    /// The fill ingredient. Its volume is computed, so it has no bound of its own.
    Derived,
}

impl MaxVolume {
    pub fn is_full(&self) -> bool {
        matches!(self, MaxVolume::Full)
    }

    pub fn limit(&self) -> Option<f64> {
        match self {
            MaxVolume::Limit(v) => Some(*v),
            MaxVolume::Full | MaxVolume::Derived => None,
        }
    }
}

impl fmt::Display for MaxVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxVolume::Limit(v) => write!(f, "{v:.1}"),
            MaxVolume::Full => f.write_str("Full"),
            MaxVolume::Derived => Ok(()),
        }
    }
}

/// One ingredient's state after propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub id: IngredientId,
    pub volume: f64,
    pub max: MaxVolume,
}

/// Total volume against container capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeStatus {
    pub total: Volume,
    pub capacity: Volume,
    /// A filler is designated, or the free capacity is below resolution.
    pub full: bool,
}

impl fmt::Display for VolumeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.full {
            write!(f, "Vol. {:.1} ml (container full)", to_ml(self.capacity))
        } else {
            write!(
                f,
                "Vol. {:.1} ml (in {:.1} ml. container)",
                to_ml(self.total),
                to_ml(self.capacity)
            )
        }
    }
}

/// Everything a caller needs to redraw after a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// In ingredient order.
    pub bounds: Vec<Bound>,
    /// `None` when there is nothing to blend.
    pub mixture: Option<Mixture>,
    pub status: VolumeStatus,
}

impl Update {
    pub fn bound(&self, id: IngredientId) -> Option<&Bound> {
        self.bounds.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fd_core::units::ml;

    #[test]
    fn max_volume_display() {
        assert_eq!(MaxVolume::Limit(12.3).to_string(), "12.3");
        assert_eq!(MaxVolume::Limit(45.0).to_string(), "45.0");
        assert_eq!(MaxVolume::Full.to_string(), "Full");
        assert_eq!(MaxVolume::Derived.to_string(), "");
    }

    #[test]
    fn status_line() {
        let open = VolumeStatus {
            total: ml(45.0),
            capacity: ml(50.0),
            full: false,
        };
        assert_eq!(open.to_string(), "Vol. 45.0 ml (in 50.0 ml. container)");

        let full = VolumeStatus {
            total: ml(49.96),
            capacity: ml(50.0),
            full: true,
        };
        assert_eq!(full.to_string(), "Vol. 50.0 ml (container full)");
    }

    #[test]
    fn limit_accessor() {
        assert_eq!(MaxVolume::Limit(3.0).limit(), Some(3.0));
        assert_eq!(MaxVolume::Full.limit(), None);
        assert!(MaxVolume::Full.is_full());
        assert!(!MaxVolume::Derived.is_full());
    }
}
