//! fd-engine: the mixture formulation engine.
//!
//! Tracks ingredient volumes under a shared container capacity, derives the volume of an
//! optional fill ingredient, recomputes every ingredient's legal maximum after each
//! mutation, rescales proportionally on container resize, and blends the result.
//!
//! The engine is synchronous and single-threaded. Callers own one engine per editing
//! session and serialize access to it.
//!
//! # Example
//!
//! ```
//! use fd_engine::{FormulationConfig, FormulationEngine, MaxVolume};
//! use fd_mix::{Composition, Ingredient};
//!
//! let mut engine = FormulationEngine::with_capacity(FormulationConfig::default(), 50.0).unwrap();
//! let pg_vg = Composition::new(50.0, 50.0).unwrap();
//! let (base, _) = engine.add(Ingredient::new("Base", pg_vg, 0.0, 0.0, 0.0).unwrap()).unwrap();
//! let (shot, _) = engine.add(Ingredient::new("Shot", pg_vg, 20.0, 0.0, 5.0).unwrap()).unwrap();
//!
//! let update = engine.set_fill(Some(base)).unwrap();
//! assert_eq!(engine.ingredient(base).unwrap().volume(), 45.0);
//! assert_eq!(update.bound(shot).unwrap().max, MaxVolume::Limit(50.0));
//! assert_eq!(update.mixture.unwrap().concentration, 2.0);
//! ```

pub mod bounds;
pub mod config;
pub mod container;
pub mod engine;
pub mod error;
pub mod snapshot;

pub use bounds::{Bound, MaxVolume, Update, VolumeStatus};
pub use config::{ConfigError, FormulationConfig};
pub use container::Container;
pub use engine::FormulationEngine;
pub use error::{EngineError, EngineResult, SnapshotError};
pub use snapshot::{IngredientDef, Snapshot};

pub use fd_core::IngredientId;
