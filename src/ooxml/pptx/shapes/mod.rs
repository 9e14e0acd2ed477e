/// Shapes module for PowerPoint presentations.
///
/// This module provides the types a table conversion works with:
/// - Placeholder shapes with their placeholder format and geometry
/// - Tables, rows and cells
/// - Text frames, paragraphs, runs and fonts
pub mod base;
pub mod table;
pub mod textframe;

pub use base::{PlaceholderFormat, PlaceholderType, Shape, ShapeGeometry};
pub use table::{DEFAULT_TABLE_STYLE_ID, Table, TableCell, TableFlags, TableRow};
pub use textframe::{Alignment, Font, Paragraph, Run, TextFrame};
