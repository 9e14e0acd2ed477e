//! Common style and formatting types.
//!
//! Colors and lengths shared by the presentation model and the converter options.

// Submodule declarations
pub mod color;
pub mod len;

// Re-exports
pub use color::{Color, ColorSpec, RGBColor, ThemeColor};
pub use len::Length;
