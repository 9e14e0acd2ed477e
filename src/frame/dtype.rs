//! Value types of columns and index levels.
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::value::Value;
use crate::common::error::{Error, Result};

/// The type of a column or index level.
///
/// `Number`, `Temporal` and `Object` are abstract: no column infers to
/// `Number` or `Temporal`, but they can key a format map and match every
/// concrete type beneath them.
///
/// ```text
/// Object ─┬─ Number ─┬─ Int
///         │          └─ Float
///         ├─ Temporal ─┬─ Date
///         │            └─ DateTime
///         ├─ Bool
///         └─ Text
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum DType {
    Bool,
    Int,
    Float,
    Number,
    Date,
    DateTime,
    Temporal,
    Text,
    Object,
}

impl DType {
    /// Whether `self` equals `other` or sits beneath it in the hierarchy.
    pub fn is_subtype_of(self, other: DType) -> bool {
        if self == other || other == DType::Object {
            return true;
        }
        match other {
            DType::Number => matches!(self, DType::Int | DType::Float),
            DType::Temporal => matches!(self, DType::Date | DType::DateTime),
            _ => false,
        }
    }

    #[inline]
    pub fn is_numeric(self) -> bool {
        self.is_subtype_of(DType::Number)
    }

    #[inline]
    pub fn is_temporal(self) -> bool {
        self.is_subtype_of(DType::Temporal)
    }

    /// Infer the dtype of a sequence of values, ignoring missing ones.
    ///
    /// Integers mixed with floats widen to `Float`; any other mix is
    /// `Object`. A sequence with no present value is `Float`, the type a
    /// column of missing numbers carries.
    pub fn infer<'a, I>(values: I) -> DType
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut inferred: Option<DType> = None;
        for dtype in values.into_iter().filter_map(Value::dtype) {
            inferred = Some(match inferred {
                None => dtype,
                Some(current) if current == dtype => current,
                Some(DType::Int) if dtype == DType::Float => DType::Float,
                Some(DType::Float) if dtype == DType::Int => DType::Float,
                Some(_) => return DType::Object,
            });
        }
        inferred.unwrap_or(DType::Float)
    }

    pub fn name(self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int => "int64",
            DType::Float => "float64",
            DType::Number => "number",
            DType::Date => "date",
            DType::DateTime => "datetime64",
            DType::Temporal => "temporal",
            DType::Text => "text",
            DType::Object => "object",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Ok(DType::Bool),
            "int" | "int64" | "integer" => Ok(DType::Int),
            "float" | "float64" | "double" => Ok(DType::Float),
            "number" | "numeric" => Ok(DType::Number),
            "date" => Ok(DType::Date),
            "datetime" | "datetime64" | "timestamp" => Ok(DType::DateTime),
            "temporal" => Ok(DType::Temporal),
            "text" | "str" | "string" => Ok(DType::Text),
            "object" => Ok(DType::Object),
            _ => Err(Error::InvalidArgument(format!("unknown dtype {s:?}"))),
        }
    }
}

impl TryFrom<String> for DType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
