//! fd-core: stable foundation for fludo.
//!
//! Contains:
//! - units (uom volume type + millilitre constructors)
//! - numeric (Real, tolerances, one-decimal truncation)
//! - ids (compact stable IDs for ingredients)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FdError, FdResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
