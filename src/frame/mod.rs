//! Labeled two-dimensional data.
//!
//! A small data-frame model: typed cell [`Value`]s, hierarchical row and
//! column [`Index`]es, reshaping ([`DataFrame::transpose`],
//! [`DataFrame::reset_index`]), aggregation through [`AggFunc`] and
//! dtype-driven text formatting through [`DtypeFormat`].

pub mod aggregate;
pub mod dataframe;
pub mod dtype;
pub mod format;
pub mod index;
pub mod value;

pub use aggregate::{AggFn, AggFunc};
pub use dataframe::DataFrame;
pub use dtype::DType;
pub use format::{DtypeFormat, NumberPattern};
pub use index::{Index, Label, Level, label};
pub use value::Value;
