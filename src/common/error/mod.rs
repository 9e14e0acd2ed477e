//! Unified error types for deckframe.
//!
//! A single error enum covers the data frame model, the presentation model and
//! the conversion pipeline, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
