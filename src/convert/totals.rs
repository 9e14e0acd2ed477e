//! Totals rows and columns.
use log::debug;

use crate::common::error::{Error, Result};
use crate::convert::options::{AggMap, Axis, TotalsLabel};
use crate::frame::{AggFunc, DataFrame, Value};

/// Append a totals row (`Axis::Index`) or totals column (`Axis::Columns`).
///
/// Each column (or row) is reduced with its entry in `aggmap`, falling back
/// to `method`. Missing values count as integer zero for the aggregation
/// only. The new row is labeled `label`, padded with `" "` on extra index
/// levels; categorical levels get the label registered as a category.
///
/// ```rust
/// use deckframe::convert::{AggMap, Axis, TotalsLabel, add_totals};
/// use deckframe::frame::{AggFunc, DataFrame, Value};
///
/// let data = DataFrame::from_columns(vec![
///     ("Units", vec![Value::Int(1), Value::Null, Value::Int(3)]),
/// ]).unwrap();
/// let totals = add_totals(&data, &TotalsLabel::default(), &AggFunc::Sum, &AggMap::new(), Axis::Index).unwrap();
/// assert_eq!(totals.column(0).unwrap()[3], Value::Int(4));
/// ```
pub fn add_totals(
    data: &DataFrame,
    label: &TotalsLabel,
    method: &AggFunc,
    aggmap: &AggMap,
    axis: Axis,
) -> Result<DataFrame> {
    let mut data = match axis {
        Axis::Index => data.clone(),
        Axis::Columns => data.transpose(),
    };

    let totals = data
        .columns()
        .labels()
        .enumerate()
        .map(|(col, column_label)| {
            let values: Vec<Value> = data
                .column(col)
                .unwrap_or_default()
                .iter()
                .map(|v| if v.is_null() { Value::Int(0) } else { v.clone() })
                .collect();
            let func = aggmap.get(&column_label).unwrap_or(method);
            func.apply(&values).map_err(|e| match e {
                Error::Aggregation(msg) => Error::Aggregation(format!(
                    "{} of {}: {msg}",
                    func.name(),
                    column_label
                        .iter()
                        .map(Value::to_text)
                        .collect::<Vec<_>>()
                        .join("/")
                )),
                e => e,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let label = label.to_label(data.index().nlevels())?;
    debug!("adding {axis} totals labeled {label:?}");
    match data.push_row(&label, totals.clone()) {
        Err(Error::LabelNotAllowed { level, label: rejected }) => {
            debug!("registering {rejected:?} as a category of index level {level}");
            data.register_categories(&label);
            data.push_row(&label, totals)?;
        },
        result => result?,
    }

    Ok(match axis {
        Axis::Index => data,
        Axis::Columns => data.transpose(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Index, label};

    fn sales() -> DataFrame {
        DataFrame::from_columns(vec![
            ("Units", vec![Value::Int(1), Value::Null, Value::Int(3)]),
            ("Price", vec![Value::Float(2.5), Value::Float(1.5), Value::Float(2.0)]),
        ])
        .unwrap()
        .with_index(Index::new(["North", "South", "East"]).with_name("Region"))
        .unwrap()
    }

    #[test]
    fn test_column_totals_treat_null_as_zero() {
        let data = sales();
        let out = add_totals(&data, &TotalsLabel::default(), &AggFunc::Sum, &AggMap::new(), Axis::Index).unwrap();
        assert_eq!(out.shape(), (4, 2));
        assert_eq!(out.value(3, 0), Some(&Value::Int(4)));
        assert_eq!(out.value(3, 1), Some(&Value::Float(6.0)));
        assert_eq!(out.index().label(3).unwrap(), label(["Total"]));
        assert_eq!(out.index().name(0), Some("Region"));
        // the caller's frame keeps its nulls
        assert_eq!(data.value(1, 0), Some(&Value::Null));
    }

    #[test]
    fn test_aggmap_overrides_method() {
        let aggmap = AggMap::new().with(["Price"], AggFunc::Mean);
        let out = add_totals(&sales(), &TotalsLabel::from("All"), &AggFunc::Sum, &aggmap, Axis::Index).unwrap();
        assert_eq!(out.value(3, 0), Some(&Value::Int(4)));
        assert_eq!(out.value(3, 1), Some(&Value::Float(2.0)));
        assert_eq!(out.index().label(3).unwrap(), label(["All"]));
    }

    #[test]
    fn test_row_totals_append_a_column() {
        let data = DataFrame::from_rows(vec![
            vec![Value::Int(1), Value::Int(2)],
            vec![Value::Int(3), Value::Null],
        ])
        .unwrap();
        let out = add_totals(&data, &TotalsLabel::default(), &AggFunc::Sum, &AggMap::new(), Axis::Columns).unwrap();
        assert_eq!(out.shape(), (2, 3));
        assert_eq!(out.column(2).unwrap(), [Value::Int(3), Value::Int(3)]);
        assert_eq!(out.columns().label(2).unwrap(), label(["Total"]));
        assert_eq!(out.index().len(), 2);
    }

    #[test]
    fn test_multi_level_label_is_padded() {
        let index = Index::from_arrays(vec![
            vec![Value::text("North"), Value::text("North")],
            vec![Value::text("Q1"), Value::text("Q2")],
        ])
        .unwrap();
        let data = DataFrame::from_columns(vec![("Units", vec![Value::Int(5), Value::Int(7)])])
            .unwrap()
            .with_index(index)
            .unwrap();
        let out = add_totals(&data, &TotalsLabel::default(), &AggFunc::Sum, &AggMap::new(), Axis::Index).unwrap();
        assert_eq!(out.index().label(2).unwrap(), label(["Total", " "]));
        assert_eq!(out.value(2, 0), Some(&Value::Int(12)));
    }

    #[test]
    fn test_categorical_index_registers_label() {
        let index = Index::categorical(["a", "b"], vec![Value::text("a"), Value::text("b")]).unwrap();
        let data = DataFrame::from_columns(vec![("x", vec![Value::Int(1), Value::Int(2)])])
            .unwrap()
            .with_index(index)
            .unwrap();
        let out = add_totals(&data, &TotalsLabel::default(), &AggFunc::Sum, &AggMap::new(), Axis::Index).unwrap();
        assert_eq!(out.nrows(), 3);
        let categories = out.index().level(0).unwrap().categories().unwrap();
        assert!(categories.contains(&Value::text("Total")));
    }

    #[test]
    fn test_text_column_fails_numeric_method() {
        let data = DataFrame::from_columns(vec![("Name", vec![Value::text("a"), Value::Null])]).unwrap();
        let err = add_totals(&data, &TotalsLabel::default(), &AggFunc::Mean, &AggMap::new(), Axis::Index).unwrap_err();
        assert!(matches!(err, Error::Aggregation(msg) if msg.starts_with("mean of Name")));
    }
}
