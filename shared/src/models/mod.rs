//! Data models
//!
//! Shared between the calculation core and the UI/extraction
//! collaborators. The receipt arrives pre-normalized (nulls filtered,
//! missing quantities defaulted) from the extraction side; everything
//! on `Person` is derived and recomputed in full by the engine.

pub mod assignment;
pub mod person;
pub mod receipt;
pub mod split;

// Re-exports
pub use assignment::*;
pub use person::*;
pub use receipt::*;
pub use split::*;
