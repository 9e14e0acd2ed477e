//! Column-major, two-dimensional labeled data.
use super::dtype::DType;
use super::index::{Index, Label};
use super::value::Value;
use crate::common::error::{Error, Result};

/// A two-dimensional table of [`Value`]s addressed by a row [`Index`] and a
/// column [`Index`].
///
/// Storage is column-major: `data[c][r]` is the value at row `r`, column `c`.
///
/// # Examples
///
/// ```rust
/// use deckframe::frame::{DataFrame, Value};
///
/// let df = DataFrame::from_columns(vec![
///     ("a", vec![Value::Int(1), Value::Null, Value::Int(3)]),
///     ("b", vec![Value::Float(0.5), Value::Float(1.5), Value::Float(2.5)]),
/// ])
/// .unwrap();
///
/// assert_eq!(df.shape(), (3, 2));
/// assert_eq!(df.value(2, 0), Some(&Value::Int(3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    index: Index,
    columns: Index,
    data: Vec<Vec<Value>>,
}

impl DataFrame {
    /// Build a frame from column-major data and both indices.
    pub fn new(data: Vec<Vec<Value>>, index: Index, columns: Index) -> Result<Self> {
        if data.len() != columns.len() {
            return Err(Error::Shape(format!(
                "{} columns of data for {} column labels",
                data.len(),
                columns.len()
            )));
        }
        if let Some((c, col)) = data.iter().enumerate().find(|(_, col)| col.len() != index.len()) {
            return Err(Error::Shape(format!(
                "column {c} has {} values, expected {}",
                col.len(),
                index.len()
            )));
        }
        Ok(Self {
            index,
            columns,
            data,
        })
    }

    /// Named columns over a default integer index.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Value>)>) -> Result<Self> {
        let nrows = columns.first().map_or(0, |(_, values)| values.len());
        let (names, data): (Vec<String>, Vec<Vec<Value>>) = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .unzip();
        Self::new(data, Index::range(nrows), Index::new(names))
    }

    /// Row-major data over default integer indices on both axes.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = vec![Vec::with_capacity(nrows); ncols];
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::Shape(format!(
                    "row {r} has {} values, expected {ncols}",
                    row.len()
                )));
            }
            for (column, value) in data.iter_mut().zip(row) {
                column.push(value);
            }
        }
        Self::new(data, Index::range(nrows), Index::range(ncols))
    }

    /// Replace the row index.
    pub fn with_index(mut self, index: Index) -> Result<Self> {
        self.set_index(index)?;
        Ok(self)
    }

    /// Replace the column index.
    pub fn with_columns(mut self, columns: Index) -> Result<Self> {
        self.set_columns(columns)?;
        Ok(self)
    }

    pub(crate) fn set_index(&mut self, index: Index) -> Result<()> {
        if index.len() != self.nrows() {
            return Err(Error::Shape(format!(
                "index of length {} for {} rows",
                index.len(),
                self.nrows()
            )));
        }
        self.index = index;
        Ok(())
    }

    pub(crate) fn set_columns(&mut self, columns: Index) -> Result<()> {
        if columns.len() != self.ncols() {
            return Err(Error::Shape(format!(
                "column index of length {} for {} columns",
                columns.len(),
                self.ncols()
            )));
        }
        self.columns = columns;
        Ok(())
    }

    /// Register each part of `label` as a category of the matching row
    /// index level.
    pub(crate) fn register_categories(&mut self, label: &[Value]) {
        for (n, value) in label.iter().enumerate() {
            self.index.add_category(n, value.clone());
        }
    }

    #[inline]
    pub fn index(&self) -> &Index {
        &self.index
    }

    #[inline]
    pub fn columns(&self) -> &Index {
        &self.columns
    }

    /// `(rows, columns)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nrows() == 0 || self.ncols() == 0
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&Value> {
        self.data.get(col).and_then(|c| c.get(row))
    }

    pub fn column(&self, col: usize) -> Option<&[Value]> {
        self.data.get(col).map(Vec::as_slice)
    }

    pub(crate) fn column_mut(&mut self, col: usize) -> Option<&mut Vec<Value>> {
        self.data.get_mut(col)
    }

    /// Values of row `row`, left to right.
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.nrows() {
            return None;
        }
        Some(self.data.iter().map(|c| c[row].clone()).collect())
    }

    /// Every row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.nrows()).filter_map(move |r| self.row(r))
    }

    /// Inferred dtype of every column.
    pub fn dtypes(&self) -> Vec<DType> {
        self.data.iter().map(DType::infer).collect()
    }

    /// Swap rows and columns, along with their indices.
    pub fn transpose(&self) -> Self {
        let mut data = vec![Vec::with_capacity(self.ncols()); self.nrows()];
        for column in &self.data {
            for (row, value) in data.iter_mut().zip(column) {
                row.push(value.clone());
            }
        }
        Self {
            index: self.columns.clone(),
            columns: self.index.clone(),
            data,
        }
    }

    /// Append a row labeled `label`. Categorical index levels reject labels
    /// that are not registered categories; the frame is left unchanged then.
    pub fn push_row(&mut self, label: &[Value], values: Vec<Value>) -> Result<()> {
        if values.len() != self.ncols() {
            return Err(Error::Shape(format!(
                "row has {} values, expected {}",
                values.len(),
                self.ncols()
            )));
        }
        self.index.push(label)?;
        for (column, value) in self.data.iter_mut().zip(values) {
            column.push(value);
        }
        Ok(())
    }

    /// Copy of the frame with every missing value replaced by `fill`.
    pub fn fill_null(&self, fill: &Value) -> Self {
        let data = self
            .data
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|v| if v.is_null() { fill.clone() } else { v.clone() })
                    .collect()
            })
            .collect();
        Self {
            index: self.index.clone(),
            columns: self.columns.clone(),
            data,
        }
    }

    /// Copy of the frame with every value rendered as text.
    pub fn to_text(&self) -> Self {
        let data = self
            .data
            .iter()
            .map(|column| column.iter().map(|v| Value::Text(v.to_text())).collect())
            .collect();
        Self {
            index: self.index.clone(),
            columns: self.columns.clone(),
            data,
        }
    }

    /// Move every row index level into a leading column and replace the
    /// row index with integer labels.
    ///
    /// A folded level's column is labeled with the level name. Unnamed levels
    /// are labeled `index` when the index has a single level (`level_0` if a
    /// column is already labeled `index`), and `level_{n}` otherwise. With a
    /// multi-level column index the remaining label levels are `""`.
    pub fn reset_index(&self) -> Result<Self> {
        let nlevels = self.index.nlevels();
        let labels: Vec<Label> = (0..nlevels)
            .map(|n| {
                let name = match self.index.name(n) {
                    Some(name) => name.to_string(),
                    None if nlevels == 1 && !self.has_column_named("index") => "index".to_string(),
                    None => format!("level_{n}"),
                };
                let mut label = Label::new();
                label.push(Value::Text(name));
                label.extend((1..self.columns.nlevels()).map(|_| Value::text("")));
                label
            })
            .collect();

        let mut columns = self.columns.clone();
        let mut data = self.data.clone();
        columns.insert_registering(0, labels)?;
        data.splice(
            0..0,
            self.index.levels().iter().map(|level| level.values().to_vec()),
        );
        Ok(Self {
            index: Index::range(self.nrows()),
            columns,
            data,
        })
    }

    /// Move every column index level into a leading row and replace the
    /// column index with integer labels.
    pub fn reset_header(&self) -> Result<Self> {
        Ok(self.transpose().reset_index()?.transpose())
    }

    fn has_column_named(&self, name: &str) -> bool {
        self.columns
            .level_values(0)
            .iter()
            .any(|v| v.as_str() == Some(name))
    }
}
