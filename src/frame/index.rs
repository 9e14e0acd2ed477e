//! Row and column labels, possibly hierarchical.
use smallvec::SmallVec;

use super::value::Value;
use crate::common::error::{Error, Result};

/// A full label across every level of an index, outermost level first.
pub type Label = SmallVec<[Value; 2]>;

/// Build a label from anything convertible to values.
///
/// ```rust
/// use deckframe::frame::{label, Value};
///
/// let l = label(["North", "Q1"]);
/// assert_eq!(l.len(), 2);
/// assert_eq!(l[1], Value::text("Q1"));
/// ```
pub fn label<I, V>(parts: I) -> Label
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    parts.into_iter().map(Into::into).collect()
}

/// One level of an index.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    name: Option<String>,
    values: Vec<Value>,
    /// Allowed values when the level is categorical
    categories: Option<Vec<Value>>,
}

impl Level {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            name: None,
            values,
            categories: None,
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn categories(&self) -> Option<&[Value]> {
        self.categories.as_deref()
    }

    #[inline]
    pub fn is_categorical(&self) -> bool {
        self.categories.is_some()
    }

    fn allows(&self, value: &Value) -> bool {
        match &self.categories {
            Some(categories) => value.is_null() || categories.contains(value),
            None => true,
        }
    }
}

/// Ordered labels for the rows or the columns of a [`DataFrame`](super::DataFrame).
///
/// An index always has at least one level, and every level holds one value
/// per position.
///
/// # Examples
///
/// ```rust
/// use deckframe::frame::{Index, Value};
///
/// let index = Index::from_arrays(vec![
///     vec!["North".into(), "North".into(), "South".into()],
///     vec![Value::Int(2023), Value::Int(2024), Value::Int(2024)],
/// ])
/// .unwrap()
/// .with_names([Some("region"), Some("year")])
/// .unwrap();
///
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.nlevels(), 2);
/// assert_eq!(index.name(1), Some("year"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    levels: Vec<Level>,
}

impl Index {
    /// Single-level index from values.
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            levels: vec![Level::new(values.into_iter().map(Into::into).collect())],
        }
    }

    /// Default integer labels `0..n`.
    pub fn range(n: usize) -> Self {
        Self::new((0..n as i64).map(Value::Int))
    }

    /// Multi-level index from one array per level.
    pub fn from_arrays(arrays: Vec<Vec<Value>>) -> Result<Self> {
        let Some(first) = arrays.first() else {
            return Err(Error::Shape("an index needs at least one level".to_string()));
        };
        let len = first.len();
        if let Some(bad) = arrays.iter().position(|a| a.len() != len) {
            return Err(Error::Shape(format!(
                "index level {bad} has {} labels, expected {len}",
                arrays[bad].len()
            )));
        }
        Ok(Self {
            levels: arrays.into_iter().map(Level::new).collect(),
        })
    }

    /// Multi-level index from full labels, one per position.
    pub fn from_labels(labels: Vec<Label>, nlevels: usize) -> Result<Self> {
        let mut arrays = vec![Vec::with_capacity(labels.len()); nlevels.max(1)];
        for (pos, label) in labels.into_iter().enumerate() {
            if label.len() != arrays.len() {
                return Err(Error::Shape(format!(
                    "label at position {pos} has {} levels, expected {}",
                    label.len(),
                    arrays.len()
                )));
            }
            for (array, value) in arrays.iter_mut().zip(label) {
                array.push(value);
            }
        }
        Self::from_arrays(arrays)
    }

    /// Single-level categorical index. Every value must be one of `categories`.
    pub fn categorical<I, V>(values: I, categories: Vec<Value>) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut level = Level::new(values.into_iter().map(Into::into).collect());
        level.categories = Some(categories);
        if let Some(bad) = level.values.iter().find(|v| !level.allows(v)) {
            return Err(Error::LabelNotAllowed {
                level: 0,
                label: bad.to_text(),
            });
        }
        Ok(Self {
            levels: vec![level],
        })
    }

    /// Set the name of the outermost level.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.levels[0].name = Some(name.into());
        self
    }

    /// Set the names of every level.
    pub fn with_names<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let names: Vec<Option<String>> = names.into_iter().map(|n| n.map(Into::into)).collect();
        if names.len() != self.levels.len() {
            return Err(Error::Shape(format!(
                "{} names given for an index with {} levels",
                names.len(),
                self.levels.len()
            )));
        }
        for (level, name) in self.levels.iter_mut().zip(names) {
            level.name = name;
        }
        Ok(self)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.levels[0].values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn nlevels(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, n: usize) -> Option<&Level> {
        self.levels.get(n)
    }

    /// Values of level `n`, in position order.
    pub fn level_values(&self, n: usize) -> &[Value] {
        self.levels.get(n).map(Level::values).unwrap_or(&[])
    }

    pub fn name(&self, n: usize) -> Option<&str> {
        self.levels.get(n).and_then(Level::name)
    }

    pub fn names(&self) -> Vec<Option<&str>> {
        self.levels.iter().map(Level::name).collect()
    }

    /// Whether any level carries a name.
    pub fn has_names(&self) -> bool {
        self.levels.iter().any(|l| l.name.is_some())
    }

    /// The full label at `pos`.
    pub fn label(&self, pos: usize) -> Option<Label> {
        if pos >= self.len() {
            return None;
        }
        Some(self.levels.iter().map(|l| l.values[pos].clone()).collect())
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        (0..self.len()).filter_map(move |pos| self.label(pos))
    }

    /// Position of the first occurrence of `label`.
    pub fn position(&self, label: &[Value]) -> Option<usize> {
        if label.len() != self.nlevels() {
            return None;
        }
        (0..self.len()).find(|&pos| {
            self.levels
                .iter()
                .zip(label)
                .all(|(level, value)| &level.values[pos] == value)
        })
    }

    /// Register `value` as an allowed category of level `n`. No-op on
    /// non-categorical levels and on values already registered.
    pub fn add_category(&mut self, n: usize, value: Value) {
        if let Some(categories) = self.levels.get_mut(n).and_then(|l| l.categories.as_mut())
            && !categories.contains(&value)
        {
            categories.push(value);
        }
    }

    /// Append a label. Categorical levels reject values that are not
    /// registered categories with [`Error::LabelNotAllowed`].
    pub fn push(&mut self, label: &[Value]) -> Result<()> {
        self.check(label)?;
        for (level, value) in self.levels.iter_mut().zip(label) {
            level.values.push(value.clone());
        }
        Ok(())
    }

    /// Insert labels at `pos`, registering them as categories where needed.
    pub(crate) fn insert_registering(&mut self, pos: usize, labels: Vec<Label>) -> Result<()> {
        if pos > self.len() {
            return Err(Error::Shape(format!(
                "insert position {pos} past the end of an index of length {}",
                self.len()
            )));
        }
        for label in &labels {
            if label.len() != self.nlevels() {
                return Err(Error::Shape(format!(
                    "label has {} levels, expected {}",
                    label.len(),
                    self.nlevels()
                )));
            }
        }
        for (n, level) in self.levels.iter_mut().enumerate() {
            let new_values: Vec<Value> = labels.iter().map(|l| l[n].clone()).collect();
            if let Some(categories) = level.categories.as_mut() {
                for value in &new_values {
                    if !value.is_null() && !categories.contains(value) {
                        categories.push(value.clone());
                    }
                }
            }
            level.values.splice(pos..pos, new_values);
        }
        Ok(())
    }

    /// Replace the values of level `n`. The level keeps its name but drops
    /// its categories, since replaced values are usually reformatted text.
    pub(crate) fn set_level_values(&mut self, n: usize, values: Vec<Value>) -> Result<()> {
        if values.len() != self.len() {
            return Err(Error::Shape(format!(
                "{} values given for an index of length {}",
                values.len(),
                self.len()
            )));
        }
        let level = self
            .levels
            .get_mut(n)
            .ok_or_else(|| Error::Shape(format!("index has no level {n}")))?;
        level.values = values;
        level.categories = None;
        Ok(())
    }

    fn check(&self, label: &[Value]) -> Result<()> {
        if label.len() != self.nlevels() {
            return Err(Error::Shape(format!(
                "label has {} levels, expected {}",
                label.len(),
                self.nlevels()
            )));
        }
        for (n, (level, value)) in self.levels.iter().zip(label).enumerate() {
            if !level.allows(value) {
                return Err(Error::LabelNotAllowed {
                    level: n,
                    label: value.to_text(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_and_labels() {
        let index = Index::range(3);
        assert_eq!(index.len(), 3);
        assert_eq!(index.nlevels(), 1);
        assert_eq!(index.label(2), Some(label([2i64])));
        assert_eq!(index.label(3), None);
    }

    #[test]
    fn test_from_arrays_rejects_ragged_levels() {
        let err = Index::from_arrays(vec![vec![Value::Int(1)], vec![]]).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
        assert!(Index::from_arrays(Vec::new()).is_err());
    }

    #[test]
    fn test_from_labels_round_trip() {
        let labels = vec![label(["a", "x"]), label(["a", "y"]), label(["b", "x"])];
        let index = Index::from_labels(labels.clone(), 2).unwrap();
        assert_eq!(index.level_values(0), &[Value::text("a"), Value::text("a"), Value::text("b")]);
        assert_eq!(index.labels().collect::<Vec<_>>(), labels);
        assert_eq!(index.position(&label(["b", "x"])), Some(2));
    }

    #[test]
    fn test_categorical_push() {
        let mut index =
            Index::categorical(["low", "high"], vec!["low".into(), "high".into()]).unwrap();
        let err = index.push(&label(["Total"])).unwrap_err();
        assert!(matches!(err, Error::LabelNotAllowed { level: 0, .. }));

        index.add_category(0, "Total".into());
        index.push(&label(["Total"])).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.level(0).unwrap().categories().unwrap().len(), 3);
    }

    #[test]
    fn test_insert_registering() {
        let mut index = Index::categorical(["a"], vec!["a".into()]).unwrap();
        index.insert_registering(0, vec![label(["index"])]).unwrap();
        assert_eq!(index.level_values(0), &[Value::text("index"), Value::text("a")]);
        assert!(index.level(0).unwrap().categories().unwrap().contains(&Value::text("index")));
    }

    #[test]
    fn test_names() {
        let index = Index::range(2).with_name("row");
        assert_eq!(index.names(), vec![Some("row")]);
        assert!(index.has_names());
        assert!(Index::range(2).with_names([Some("a"), Some("b")]).is_err());
    }
}
