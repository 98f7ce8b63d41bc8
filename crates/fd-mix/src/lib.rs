//! fd-mix: liquid properties and blend math for fludo.
//!
//! Provides:
//! - `Composition`: primary/secondary percentages with the remainder as water
//! - `Ingredient`: one liquid's intensive properties plus its volume in the mixture
//! - `Mixture` and `blend()`: volume-weighted aggregate of a set of ingredients
//!
//! Everything here is a plain value; the stateful capacity bookkeeping lives in `fd-engine`.
//!
//! # Example
//!
//! ```
//! use fd_mix::{blend, Composition, Ingredient};
//!
//! let base = Ingredient::new("Base", Composition::new(50.0, 50.0).unwrap(), 0.0, 0.0, 45.0).unwrap();
//! let shot = Ingredient::new("Shot", Composition::new(50.0, 50.0).unwrap(), 20.0, 0.0, 5.0).unwrap();
//!
//! let mixture = blend([&base, &shot]).unwrap();
//! assert_eq!(mixture.concentration, 2.0);
//! ```

pub mod blend;
pub mod composition;
pub mod error;
pub mod ingredient;

// Re-exports for ergonomics
pub use blend::{Mixture, blend};
pub use composition::Composition;
pub use error::{MixError, MixResult};
pub use ingredient::Ingredient;
