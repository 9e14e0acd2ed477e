//! Common types and utilities shared across the crate.
//!
//! Errors, units, lengths, colors and XML text helpers used by both the data
//! frame model and the presentation model.

// Submodule declarations
pub mod error;
pub mod style;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::{Color, ColorSpec, Length, RGBColor, ThemeColor};
