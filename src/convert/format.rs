//! Text rendering of labels and values before they reach table cells.
use log::debug;

use crate::common::error::Result;
use crate::convert::options::Axis;
use crate::frame::{DataFrame, DtypeFormat, Value};

/// Format every level of the row (`Axis::Index`) or column (`Axis::Columns`)
/// labels with `dtype_format`, then render all labels as text.
///
/// Missing labels render as `"nan"`.
pub fn format_index(
    data: &DataFrame,
    dtype_format: Option<&DtypeFormat>,
    axis: Axis,
) -> Result<DataFrame> {
    let mut index = match axis {
        Axis::Index => data.index().clone(),
        Axis::Columns => data.columns().clone(),
    };
    for n in 0..index.nlevels() {
        let mut values = index.level_values(n).to_vec();
        if let Some(format) = dtype_format {
            values = format.apply(&values)?;
        }
        let values = values.iter().map(|v| Value::Text(v.to_text())).collect();
        index.set_level_values(n, values)?;
    }
    debug!("formatted {} {axis} level(s)", index.nlevels());

    let mut data = data.clone();
    match axis {
        Axis::Index => data.set_index(index)?,
        Axis::Columns => data.set_columns(index)?,
    }
    Ok(data)
}

/// Format every column with `dtype_format`, replace missing values with
/// `na_rep` and render all values as text.
pub fn format_values(
    data: &DataFrame,
    dtype_format: Option<&DtypeFormat>,
    na_rep: &str,
) -> Result<DataFrame> {
    let mut data = data.clone();
    if let Some(format) = dtype_format {
        for col in 0..data.ncols() {
            if let Some(column) = data.column_mut(col) {
                *column = format.apply(column)?;
            }
        }
    }
    Ok(data.fill_null(&Value::text(na_rep)).to_text())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::common::error::Error;
    use crate::frame::{DType, Index, label};

    fn monthly() -> DataFrame {
        let months = Index::new([
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        ])
        .with_name("Month");
        DataFrame::from_columns(vec![
            ("Revenue", vec![Value::Float(1234.5), Value::Null]),
            ("Units", vec![Value::Int(3), Value::Int(4)]),
        ])
        .unwrap()
        .with_index(months)
        .unwrap()
    }

    #[test]
    fn test_format_index_dates() {
        let format = DtypeFormat::new().with(DType::Date, "%b %Y");
        let out = format_index(&monthly(), Some(&format), Axis::Index).unwrap();
        assert_eq!(out.index().label(0).unwrap(), label(["Jan 2024"]));
        assert_eq!(out.index().name(0), Some("Month"));
    }

    #[test]
    fn test_format_index_without_format_renders_text() {
        let data = DataFrame::from_rows(vec![vec![Value::Int(1), Value::Int(2)]]).unwrap();
        let out = format_index(&data, None, Axis::Columns).unwrap();
        assert_eq!(out.columns().level_values(0), [Value::text("0"), Value::text("1")]);
        assert_eq!(out.index().level_values(0), [Value::Int(0)]);
    }

    #[test]
    fn test_format_index_rejects_text_dtype() {
        let format = DtypeFormat::new().with(DType::Text, "{}");
        let err = format_index(&monthly(), Some(&format), Axis::Columns).unwrap_err();
        assert!(matches!(err, Error::Unimplemented(msg) if msg.contains("text")));
    }

    #[test]
    fn test_format_values_na_rep() {
        let format = DtypeFormat::new().with(DType::Float, "{:,.2f}");
        let out = format_values(&monthly(), Some(&format), " ").unwrap();
        assert_eq!(out.column(0).unwrap(), [Value::text("1,234.50"), Value::text(" ")]);
        assert_eq!(out.column(1).unwrap(), [Value::text("3"), Value::text("4")]);
        assert!(out.dtypes().iter().all(|d| *d == DType::Text));
    }

    #[test]
    fn test_format_values_numbers_share_a_pattern() {
        let format = DtypeFormat::new().with(DType::Number, "{:.1f}");
        let out = format_values(&monthly(), Some(&format), "-").unwrap();
        assert_eq!(out.column(0).unwrap(), [Value::text("1234.5"), Value::text("-")]);
        assert_eq!(out.column(1).unwrap(), [Value::text("3.0"), Value::text("4.0")]);
    }
}
