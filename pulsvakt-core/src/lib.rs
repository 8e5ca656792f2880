//! # pulsvakt-core
//!
//! Foundation layer for synthetic patient event generation.
//! Built with determinism and testability as primary design constraints.
//!
//! ### Key Submodules:
//! - `events`: immutable per-patient event records
//! - `generators`: stateful per-patient data generators with seedable randomness
//!
//! ### Expectations:
//! - One state cell per patient, allocated once, never resized
//! - Identical event sequences under a fixed seed
//! - Typed errors for out-of-range patient ids

pub mod error;
pub mod events;
pub mod generators;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::events::*;
    pub use crate::generators::*;
}

pub use error::GeneratorError;
