use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier handed out by the formulation engine.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based sequence number by storing seq+1.
    ///
    /// Returns `None` once the sequence space is exhausted.
    pub fn from_index(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Recover the 0-based sequence number.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

/// Ingredient identity inside one engine. Survives reordering and removal of other ingredients.
pub type IngredientId = Id;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = Id::from_index(i).unwrap();
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn id_space_exhaustion() {
        assert!(Id::from_index(u32::MAX).is_none());
        assert!(Id::from_index(u32::MAX - 1).is_some());
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<Id>(),
            core::mem::size_of::<Option<Id>>()
        );
    }

    #[test]
    fn display_is_hash_prefixed() {
        assert_eq!(Id::from_index(7).unwrap().to_string(), "#7");
    }
}
