//! Aggregation functions used to build totals.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use super::value::Value;
use crate::common::error::{Error, Result};

/// Signature of a caller-supplied aggregation.
pub type AggFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// How a column (or row) of values is reduced to a single total.
///
/// Missing values are expected to be filled before aggregation; the reducers
/// below skip any that remain, except [`AggFunc::Count`] which counts only
/// present values.
#[derive(Clone, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum AggFunc {
    #[default]
    Sum,
    Mean,
    Median,
    Min,
    Max,
    Count,
    Prod,
    /// Sample standard deviation
    Std,
    First,
    Last,
    Custom(Arc<AggFn>),
}

impl AggFunc {
    /// Wrap a closure as an aggregation.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        AggFunc::Custom(Arc::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            AggFunc::Sum => "sum",
            AggFunc::Mean => "mean",
            AggFunc::Median => "median",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::Count => "count",
            AggFunc::Prod => "prod",
            AggFunc::Std => "std",
            AggFunc::First => "first",
            AggFunc::Last => "last",
            AggFunc::Custom(_) => "custom",
        }
    }

    /// Reduce `values` to a single value.
    pub fn apply(&self, values: &[Value]) -> Result<Value> {
        let present = || values.iter().filter(|v| !v.is_null());
        match self {
            AggFunc::Sum => sum(values),
            AggFunc::Mean => {
                let nums = numbers(self, values)?;
                if nums.is_empty() {
                    return Ok(Value::Null);
                }
                Ok(Value::Float(nums.iter().sum::<f64>() / nums.len() as f64))
            },
            AggFunc::Median => {
                let mut nums = numbers(self, values)?;
                if nums.is_empty() {
                    return Ok(Value::Null);
                }
                nums.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                let mid = nums.len() / 2;
                let median = if nums.len() % 2 == 0 {
                    (nums[mid - 1] + nums[mid]) / 2.0
                } else {
                    nums[mid]
                };
                Ok(Value::Float(median))
            },
            AggFunc::Std => {
                let nums = numbers(self, values)?;
                if nums.len() < 2 {
                    return Ok(Value::Null);
                }
                let n = nums.len() as f64;
                let mean = nums.iter().sum::<f64>() / n;
                let var = nums.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
                Ok(Value::Float(var.sqrt()))
            },
            AggFunc::Prod => {
                if present().all(|v| matches!(v, Value::Int(_) | Value::Bool(_))) {
                    let product = present()
                        .filter_map(Value::as_i64)
                        .try_fold(1i64, i64::checked_mul);
                    if let Some(product) = product {
                        return Ok(Value::Int(product));
                    }
                }
                Ok(Value::Float(numbers(self, values)?.iter().product()))
            },
            AggFunc::Min => extreme(self, values, Ordering::Less),
            AggFunc::Max => extreme(self, values, Ordering::Greater),
            AggFunc::Count => Ok(Value::Int(present().count() as i64)),
            AggFunc::First => Ok(present().next().cloned().unwrap_or_default()),
            AggFunc::Last => Ok(present().last().cloned().unwrap_or_default()),
            AggFunc::Custom(f) => f(values),
        }
    }
}

fn sum(values: &[Value]) -> Result<Value> {
    let present: Vec<&Value> = values.iter().filter(|v| !v.is_null()).collect();
    if !present.is_empty() && present.iter().all(|v| matches!(v, Value::Text(_))) {
        return Ok(Value::Text(
            present.iter().filter_map(|v| v.as_str()).collect(),
        ));
    }
    if present
        .iter()
        .all(|v| matches!(v, Value::Int(_) | Value::Bool(_)))
    {
        let total = present
            .iter()
            .filter_map(|v| v.as_i64())
            .try_fold(0i64, i64::checked_add);
        if let Some(total) = total {
            return Ok(Value::Int(total));
        }
    }
    let mut total = 0.0;
    for v in present {
        total += v.as_f64().ok_or_else(|| not_numeric(&AggFunc::Sum, v))?;
    }
    Ok(Value::Float(total))
}

fn numbers(func: &AggFunc, values: &[Value]) -> Result<Vec<f64>> {
    values
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| v.as_f64().ok_or_else(|| not_numeric(func, v)))
        .collect()
}

fn extreme(func: &AggFunc, values: &[Value], keep: Ordering) -> Result<Value> {
    let mut best: Option<&Value> = None;
    for v in values.iter().filter(|v| !v.is_null()) {
        best = match best {
            None => Some(v),
            Some(current) => match v.compare(current) {
                Some(ord) if ord == keep => Some(v),
                Some(_) => Some(current),
                None => {
                    return Err(Error::Aggregation(format!(
                        "cannot compare {v:?} with {current:?} for {}",
                        func.name()
                    )));
                },
            },
        };
    }
    Ok(best.cloned().unwrap_or_default())
}

fn not_numeric(func: &AggFunc, value: &Value) -> Error {
    Error::Aggregation(format!(
        "{} needs numeric values, found {value:?}",
        func.name()
    ))
}

impl fmt::Debug for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggFunc::Custom(_) => f.write_str("Custom(..)"),
            other => f.write_str(other.name()),
        }
    }
}

impl PartialEq for AggFunc {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AggFunc::Custom(a), AggFunc::Custom(b)) => Arc::ptr_eq(a, b),
            (a, b) => a.name() == b.name(),
        }
    }
}

impl FromStr for AggFunc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(AggFunc::Sum),
            "mean" | "average" | "avg" => Ok(AggFunc::Mean),
            "median" => Ok(AggFunc::Median),
            "min" => Ok(AggFunc::Min),
            "max" => Ok(AggFunc::Max),
            "count" => Ok(AggFunc::Count),
            "prod" | "product" => Ok(AggFunc::Prod),
            "std" => Ok(AggFunc::Std),
            "first" => Ok(AggFunc::First),
            "last" => Ok(AggFunc::Last),
            _ => Err(Error::InvalidArgument(format!(
                "unknown aggregation {s:?}; use one of sum, mean, median, min, max, count, prod, std, first, last"
            ))),
        }
    }
}

impl TryFrom<String> for AggFunc {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int).collect()
    }

    #[test]
    fn test_sum_keeps_integers() {
        assert_eq!(AggFunc::Sum.apply(&ints(&[1, 0, 3])).unwrap(), Value::Int(4));
        assert_eq!(
            AggFunc::Sum
                .apply(&[Value::Int(1), Value::Float(0.5)])
                .unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            AggFunc::Sum.apply(&ints(&[i64::MAX, 1])).unwrap(),
            Value::Float(i64::MAX as f64 + 1.0)
        );
    }

    #[test]
    fn test_sum_of_text_concatenates() {
        let values = [Value::text("a"), Value::text("b")];
        assert_eq!(AggFunc::Sum.apply(&values).unwrap(), Value::text("ab"));
        let mixed = [Value::text("a"), Value::Int(1)];
        assert!(matches!(
            AggFunc::Sum.apply(&mixed).unwrap_err(),
            Error::Aggregation(_)
        ));
    }

    #[test]
    fn test_statistics() {
        let values = ints(&[1, 2, 3, 4]);
        assert_eq!(AggFunc::Mean.apply(&values).unwrap(), Value::Float(2.5));
        assert_eq!(AggFunc::Median.apply(&values).unwrap(), Value::Float(2.5));
        assert_eq!(AggFunc::Min.apply(&values).unwrap(), Value::Int(1));
        assert_eq!(AggFunc::Max.apply(&values).unwrap(), Value::Int(4));
        assert_eq!(AggFunc::Prod.apply(&values).unwrap(), Value::Int(24));
        assert_eq!(AggFunc::Count.apply(&values).unwrap(), Value::Int(4));
        assert_eq!(AggFunc::First.apply(&values).unwrap(), Value::Int(1));
        assert_eq!(AggFunc::Last.apply(&values).unwrap(), Value::Int(4));
        let Value::Float(std) = AggFunc::Std.apply(&values).unwrap() else {
            panic!("std should be a float");
        };
        assert!((std - 1.290_994_448_735_805_6).abs() < 1e-12);
    }

    #[test]
    fn test_numeric_only_functions_reject_text() {
        let values = [Value::text("a")];
        assert!(AggFunc::Mean.apply(&values).is_err());
        assert!(AggFunc::Std.apply(&values).is_err());
        assert_eq!(AggFunc::Mean.apply(&[]).unwrap(), Value::Null);
    }

    #[test]
    fn test_custom() {
        let f = AggFunc::custom(|values| Ok(Value::Int(values.len() as i64 * 10)));
        assert_eq!(f.apply(&ints(&[1, 2])).unwrap(), Value::Int(20));
        assert_eq!(format!("{f:?}"), "Custom(..)");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Mean".parse::<AggFunc>().unwrap(), AggFunc::Mean);
        assert!("mode".parse::<AggFunc>().is_err());
    }
}
