//! Folding of the header and index into the table body.
use log::debug;

use crate::common::error::Result;
use crate::convert::options::KeepNames;
use crate::frame::DataFrame;

/// Fold the column labels into leading rows (`header`) and the row labels
/// into leading columns (`index`).
///
/// When both are folded, the level names of the axis folded first end up in
/// the corner cells: [`KeepNames::Index`] folds the index first and
/// [`KeepNames::Columns`] folds the header first.
pub fn transform(
    data: &DataFrame,
    header: bool,
    index: bool,
    keep_names: KeepNames,
) -> Result<DataFrame> {
    let mut data = data.clone();
    let fold_index = |data: DataFrame| if index { data.reset_index() } else { Ok(data) };
    let fold_header = |data: DataFrame| if header { data.reset_header() } else { Ok(data) };
    match keep_names {
        KeepNames::Index => {
            data = fold_index(data)?;
            data = fold_header(data)?;
        },
        KeepNames::Columns => {
            data = fold_header(data)?;
            data = fold_index(data)?;
        },
    }
    debug!(
        "folded header={header} index={index} ({keep_names:?} first) into a {}x{} grid",
        data.nrows(),
        data.ncols()
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Index, Value};

    fn named() -> DataFrame {
        DataFrame::from_columns(vec![
            ("a", vec![Value::text("1"), Value::text("2")]),
            ("b", vec![Value::text("3"), Value::text("4")]),
        ])
        .unwrap()
        .with_index(Index::new(["x", "y"]).with_name("Row"))
        .unwrap()
        .with_columns(Index::new(["a", "b"]).with_name("Col"))
        .unwrap()
    }

    fn grid(data: &DataFrame) -> Vec<Vec<String>> {
        data.rows()
            .map(|row| row.iter().map(Value::to_text).collect())
            .collect()
    }

    #[test]
    fn test_no_folding_keeps_shape() {
        let data = named();
        let out = transform(&data, false, false, KeepNames::Columns).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_header_only() {
        let out = transform(&named(), true, false, KeepNames::Columns).unwrap();
        assert_eq!(grid(&out), [["a", "b"], ["1", "3"], ["2", "4"]]);
    }

    #[test]
    fn test_index_only() {
        let out = transform(&named(), false, true, KeepNames::Columns).unwrap();
        assert_eq!(grid(&out), [["x", "1", "3"], ["y", "2", "4"]]);
    }

    #[test]
    fn test_keep_names_changes_the_corner() {
        let columns_first = transform(&named(), true, true, KeepNames::Columns).unwrap();
        assert_eq!(
            grid(&columns_first),
            [["Col", "a", "b"], ["x", "1", "3"], ["y", "2", "4"]]
        );

        let index_first = transform(&named(), true, true, KeepNames::Index).unwrap();
        assert_eq!(
            grid(&index_first),
            [["Row", "a", "b"], ["x", "1", "3"], ["y", "2", "4"]]
        );
        assert_eq!(columns_first.shape(), index_first.shape());
    }
}
