//! Deckframe - render data frames as PowerPoint tables
//!
//! This library turns labeled two-dimensional data into native PowerPoint
//! tables placed in slide placeholders, with optional header and index
//! folding, totals rows and columns, dtype-driven number formatting and
//! header/index styling with merged label runs.
//!
//! # Features
//!
//! - **Data frames**: typed values, hierarchical row and column labels,
//!   categorical levels, transposition and aggregation
//! - **Totals**: per-column or per-row aggregation with per-label overrides
//! - **Formatting**: number and date patterns chosen by dtype
//! - **Styling**: header and index fills, fonts and merged cells, table
//!   style flags
//! - **Presentation model**: slide layouts, placeholders and tables written
//!   to and read back from PresentationML/DrawingML XML
//! - **Configuration**: options loadable from YAML
//!
//! # Example - Rendering a frame
//!
//! ```rust
//! use deckframe::convert::{TableConverter, TableOptions};
//! use deckframe::frame::{DataFrame, Index, Value};
//! use deckframe::ooxml::pptx::Presentation;
//!
//! # fn main() -> deckframe::Result<()> {
//! let data = DataFrame::from_columns(vec![
//!     ("Q1", vec![Value::Int(120), Value::Int(80)]),
//!     ("Q2", vec![Value::Int(135), Value::Null]),
//! ])?
//! .with_index(Index::new(["North", "South"]).with_name("Region"))?;
//!
//! let mut pres = Presentation::new();
//! let slide = pres.add_slide("Title and Content")?;
//! let shape = slide.placeholder_mut(1).expect("content placeholder");
//!
//! let options = TableOptions {
//!     header: true,
//!     index: true,
//!     row_totals: true,
//!     ..TableOptions::default()
//! };
//! TableConverter::new(shape, &data, options)?.convert()?;
//!
//! let xml = slide.to_xml()?;
//! assert!(xml.contains("<a:tbl>"));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Options from YAML
//!
//! ```rust
//! use deckframe::convert::{Axis, TableOptions};
//!
//! let options = TableOptions::from_yaml_str(
//!     "header: true\ncolumn_totals: true\ncolumn_totals_method: mean\nna_rep: '-'\n",
//! )
//! .unwrap();
//! assert!(options.column_totals);
//! assert_eq!(options.na_rep, "-");
//! assert_eq!("columns".parse::<Axis>().unwrap(), Axis::Columns);
//! ```

/// Shared errors, units, colors and XML helpers
pub mod common;

/// Data frame to table conversion
///
/// The rendering pipeline and its individual stages: label formatting,
/// totals, value formatting, header/index folding, insertion and styling.
pub mod convert;

/// Labeled two-dimensional data
pub mod frame;

/// Office Open XML presentation model
///
/// Slide layouts, slides, placeholders and tables, with their XML
/// serialization and parsing.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use convert::{TableConverter, TableOptions};
pub use frame::{DataFrame, Index, Value};
