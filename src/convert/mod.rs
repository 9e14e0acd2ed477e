//! Conversion of data frames into PowerPoint tables.
//!
//! [`TableConverter`] drives the whole pipeline against one target shape:
//!
//! 1. row and column labels are formatted with the configured
//!    [`DtypeFormat`](crate::frame::DtypeFormat),
//! 2. totals rows and columns are computed on the raw values ([`add_totals`]),
//! 3. values are formatted and missing values replaced ([`format_values`]),
//! 4. the header and index are folded into the body ([`transform`]),
//! 5. a table sized to the grid is inserted and filled, then the header
//!    and index are styled and merged ([`style_index`], [`table_flags`]).
//!
//! The individual stages are public so they can be reused on their own.
//! [`map_layouts`] and [`map_shapes`] look up layouts and placeholder
//! indices by name.
//!
//! # Examples
//!
//! ```rust
//! use deckframe::convert::{AggMap, Axis, TotalsLabel, add_totals};
//! use deckframe::frame::{AggFunc, DataFrame, Value};
//!
//! let data = DataFrame::from_columns(vec![
//!     ("Units", vec![Value::Int(1), Value::Null, Value::Int(3)]),
//!     ("Label", vec![Value::text("a"), Value::text("b"), Value::text("c")]),
//! ])
//! .unwrap();
//!
//! let aggmap = AggMap::new().with(["Label"], AggFunc::Count);
//! let totals = add_totals(&data, &TotalsLabel::default(), &AggFunc::Sum, &aggmap, Axis::Index).unwrap();
//! assert_eq!(totals.nrows(), 4);
//! assert_eq!(totals.value(3, 0), Some(&Value::Int(4)));
//! assert_eq!(totals.value(3, 1), Some(&Value::Int(3)));
//! ```
mod converter;
mod format;
mod locate;
pub mod merge;
mod options;
mod style;
mod totals;
mod transform;

#[cfg(test)]
mod tests;

pub use converter::{InsertOutcome, Rendered, TableConverter};
pub use format::{format_index, format_values};
pub use locate::{map_layouts, map_shapes};
pub use options::{AggMap, Axis, IndexStyle, KeepNames, StyleOverrides, TableOptions, TotalsLabel};
pub use style::{style_index, table_flags};
pub use totals::add_totals;
pub use transform::transform;
