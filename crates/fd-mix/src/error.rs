//! Liquid property errors.

use fd_core::FdError;
use thiserror::Error;

/// Result type for liquid property operations.
pub type MixResult<T> = Result<T, MixError>;

/// Errors raised while constructing or mutating liquid values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MixError {
    /// Non-finite or negative numeric property.
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    /// Primary and secondary percentages add up to more than 100.
    #[error("Composition exceeds 100%: {primary} + {secondary}")]
    CompositionOverflow { primary: f64, secondary: f64 },
}

impl From<FdError> for MixError {
    fn from(err: FdError) -> Self {
        match err {
            FdError::NonFinite { what, value } | FdError::Negative { what, value } => {
                MixError::NonPhysical { what, value }
            }
            FdError::Invariant { what } => MixError::NonPhysical {
                what,
                value: f64::NAN,
            },
        }
    }
}

impl From<MixError> for FdError {
    fn from(err: MixError) -> Self {
        match err {
            MixError::NonPhysical { what, value } if value.is_finite() => {
                FdError::Negative { what, value }
            }
            MixError::NonPhysical { what, value } => FdError::NonFinite { what, value },
            MixError::CompositionOverflow { .. } => FdError::Invariant {
                what: "primary + secondary must not exceed 100%",
            },
        }
    }
}
