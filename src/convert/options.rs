//! Render options of a table conversion.
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::error::{Error, Result};
use crate::common::style::ColorSpec;
use crate::frame::{AggFunc, DtypeFormat, Label, Value};

/// Which data frame axis an operation targets.
///
/// `Index` addresses rows (totals row, index columns), `Columns` addresses
/// columns (totals column, header rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Axis {
    #[default]
    Index,
    Columns,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Axis::Index => "index",
            Axis::Columns => "columns",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "0" | "index" => Ok(Axis::Index),
            "1" | "columns" => Ok(Axis::Columns),
            _ => Err(Error::InvalidArgument(format!(
                "incorrect value for axis {s:?}: use 0 or \"index\" for rows, 1 or \"columns\" for columns"
            ))),
        }
    }
}

impl TryFrom<String> for Axis {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Which axis keeps its level names in the corner cells when both the
/// header and the index are folded into the table body.
///
/// The names of the axis folded first end up in the corner, so `Index`
/// folds the index first and `Columns` folds the header first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum KeepNames {
    Index,
    #[default]
    Columns,
}

impl FromStr for KeepNames {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "index" => Ok(KeepNames::Index),
            "columns" => Ok(KeepNames::Columns),
            _ => Err(Error::InvalidArgument(format!(
                "incorrect value for keep_names {s:?}: use \"index\" or \"columns\""
            ))),
        }
    }
}

impl TryFrom<String> for KeepNames {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Label of an inserted totals row or column.
///
/// The given parts fill the leading index levels; remaining levels are
/// padded with `" "`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "LabelRepr")]
pub struct TotalsLabel(Vec<String>);

impl TotalsLabel {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// The label padded to `nlevels` index levels.
    pub fn to_label(&self, nlevels: usize) -> Result<Label> {
        if self.0.len() > nlevels {
            return Err(Error::InvalidArgument(format!(
                "totals label {:?} has {} levels, the index has {nlevels}",
                self.0,
                self.0.len()
            )));
        }
        let mut label: Label = self.0.iter().map(|s| Value::text(s.as_str())).collect();
        label.extend((self.0.len()..nlevels).map(|_| Value::text(" ")));
        Ok(label)
    }
}

impl Default for TotalsLabel {
    fn default() -> Self {
        Self::from("Total")
    }
}

impl From<&str> for TotalsLabel {
    fn from(s: &str) -> Self {
        Self(vec![s.to_string()])
    }
}

impl From<String> for TotalsLabel {
    fn from(s: String) -> Self {
        Self(vec![s])
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelRepr {
    One(String),
    Levels(Vec<String>),
}

impl From<LabelRepr> for TotalsLabel {
    fn from(repr: LabelRepr) -> Self {
        match repr {
            LabelRepr::One(s) => Self::from(s),
            LabelRepr::Levels(parts) => Self(parts),
        }
    }
}

/// Per column (or per row) aggregation overrides for totals, keyed by the
/// text of the label.
///
/// A single-level key matches labels whose only level renders to that text;
/// multi-level keys match level by level.
///
/// ```rust
/// use deckframe::convert::AggMap;
/// use deckframe::frame::{AggFunc, label};
///
/// let aggmap = AggMap::new().with(["Margin"], AggFunc::Mean);
/// assert_eq!(aggmap.get(&label(["Margin"])), Some(&AggFunc::Mean));
/// assert_eq!(aggmap.get(&label(["Sales"])), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, AggFunc>")]
pub struct AggMap {
    entries: Vec<(Vec<String>, AggFunc)>,
}

impl AggMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `func` for the label made of `parts`. A later entry for the
    /// same label replaces the earlier one.
    pub fn with<I, S>(mut self, parts: I, func: AggFunc) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(parts, func);
        self
    }

    pub fn insert<I, S>(&mut self, parts: I, func: AggFunc)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key: Vec<String> = parts.into_iter().map(Into::into).collect();
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, func));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The aggregation registered for `label`, if any.
    pub fn get(&self, label: &[Value]) -> Option<&AggFunc> {
        self.entries
            .iter()
            .find(|(key, _)| {
                key.len() == label.len()
                    && key.iter().zip(label).all(|(k, v)| *k == v.to_text())
            })
            .map(|(_, func)| func)
    }
}

impl From<BTreeMap<String, AggFunc>> for AggMap {
    fn from(map: BTreeMap<String, AggFunc>) -> Self {
        Self {
            entries: map.into_iter().map(|(k, f)| (vec![k], f)).collect(),
        }
    }
}

/// Styling of the header rows or index columns of a rendered table.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexStyle {
    /// Fill every targeted cell with `fill_color`
    pub fill: bool,
    pub bold: bool,
    /// Font size in points
    pub font_size: Option<f64>,
    pub font_color: Option<ColorSpec>,
    pub fill_color: ColorSpec,
    /// Merge adjacent cells holding equal labels
    pub merge_indices: bool,
    /// Center the text of merged cells
    pub center_merge: bool,
}

impl Default for IndexStyle {
    fn default() -> Self {
        Self {
            fill: true,
            bold: false,
            font_size: None,
            font_color: None,
            fill_color: ColorSpec::default(),
            merge_indices: true,
            center_merge: true,
        }
    }
}

/// Per-call overrides of the table styling options. `None` keeps the value
/// configured in [`TableOptions`].
///
/// Explicitly requesting header (or index) styling while the header (or
/// index) is not rendered is an error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    pub fill_header: Option<bool>,
    pub bold_header: Option<bool>,
    pub header_font_size: Option<f64>,
    pub header_font_color: Option<ColorSpec>,
    pub fill_index: Option<bool>,
    pub bold_index: Option<bool>,
    pub index_font_size: Option<f64>,
    pub index_font_color: Option<ColorSpec>,
    pub fill_color: Option<ColorSpec>,
    pub row_banding: Option<bool>,
    pub column_banding: Option<bool>,
    pub first_row: Option<bool>,
    pub first_col: Option<bool>,
    pub last_row: Option<bool>,
    pub last_col: Option<bool>,
    pub merge_indices: Option<bool>,
    pub center_merge: Option<bool>,
}

impl StyleOverrides {
    pub(crate) fn requests_header_style(&self) -> bool {
        self.fill_header == Some(true)
            || self.bold_header == Some(true)
            || self.header_font_size.is_some()
            || self.header_font_color.is_some()
    }

    pub(crate) fn requests_index_style(&self) -> bool {
        self.fill_index == Some(true)
            || self.bold_index == Some(true)
            || self.index_font_size.is_some()
            || self.index_font_color.is_some()
    }
}

/// Options of a table conversion.
///
/// Every field has a default, so a configuration file only needs the fields
/// it changes:
///
/// ```rust
/// use deckframe::convert::{KeepNames, TableOptions};
///
/// let options = TableOptions::from_yaml_str(
///     "header: true\nindex: true\nkeep_names: index\nfill_color: '#1F4E79'\n",
/// )
/// .unwrap();
/// assert!(options.header);
/// assert_eq!(options.keep_names, KeepNames::Index);
/// assert_eq!(options.na_rep, " ");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Render the column labels as leading rows
    pub header: bool,
    /// Render the row labels as leading columns
    pub index: bool,
    pub keep_names: KeepNames,
    /// Text of missing values
    pub na_rep: String,
    pub dtype_format: Option<DtypeFormat>,
    /// Font size in points of every cell
    pub font_size: Option<f64>,
    pub font_color: Option<ColorSpec>,
    pub font_name: Option<String>,

    /// Append a totals row
    pub column_totals: bool,
    pub column_totals_label: TotalsLabel,
    pub column_totals_method: AggFunc,
    pub column_totals_aggmap: AggMap,
    /// Append a totals column
    pub row_totals: bool,
    pub row_totals_label: TotalsLabel,
    pub row_totals_method: AggFunc,
    pub row_totals_aggmap: AggMap,

    pub fill_header: bool,
    pub bold_header: bool,
    pub header_font_size: Option<f64>,
    pub header_font_color: Option<ColorSpec>,
    pub fill_index: bool,
    pub bold_index: bool,
    pub index_font_size: Option<f64>,
    pub index_font_color: Option<ColorSpec>,
    /// Fill of styled header and index cells
    pub fill_color: ColorSpec,

    pub row_banding: bool,
    pub column_banding: bool,
    pub first_row: bool,
    pub first_col: bool,
    pub last_row: bool,
    pub last_col: bool,
    pub merge_indices: bool,
    pub center_merge: bool,

    /// Replace a table already present in the target shape
    pub overwrite: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            header: false,
            index: false,
            keep_names: KeepNames::default(),
            na_rep: " ".to_string(),
            dtype_format: None,
            font_size: None,
            font_color: None,
            font_name: None,
            column_totals: false,
            column_totals_label: TotalsLabel::default(),
            column_totals_method: AggFunc::default(),
            column_totals_aggmap: AggMap::default(),
            row_totals: false,
            row_totals_label: TotalsLabel::default(),
            row_totals_method: AggFunc::default(),
            row_totals_aggmap: AggMap::default(),
            fill_header: true,
            bold_header: true,
            header_font_size: None,
            header_font_color: None,
            fill_index: false,
            bold_index: true,
            index_font_size: None,
            index_font_color: None,
            fill_color: ColorSpec::default(),
            row_banding: true,
            column_banding: false,
            first_row: false,
            first_col: false,
            last_row: false,
            last_col: false,
            merge_indices: true,
            center_merge: true,
            overwrite: false,
        }
    }
}

impl TableOptions {
    /// Load options from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: Self = serde_saphyr::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Check the options for contradictions.
    ///
    /// `fill_header` and `bold_index` default to `true` and are not treated
    /// as explicit requests; a header font, an index font or `fill_index`
    /// without the matching axis rendered are.
    pub fn validate(&self) -> Result<()> {
        if !self.header && (self.header_font_size.is_some() || self.header_font_color.is_some()) {
            return Err(Error::InvalidArgument(
                "cannot style the header when it is not rendered; set header to true".to_string(),
            ));
        }
        if !self.index
            && (self.fill_index || self.index_font_size.is_some() || self.index_font_color.is_some())
        {
            return Err(Error::InvalidArgument(
                "cannot style the index when it is not rendered; set index to true".to_string(),
            ));
        }
        for size in [self.font_size, self.header_font_size, self.index_font_size]
            .into_iter()
            .flatten()
        {
            if !(size.is_finite() && size > 0.0) {
                return Err(Error::InvalidArgument(format!(
                    "font size must be a positive number of points, got {size}"
                )));
            }
        }
        for color in [&self.font_color, &self.header_font_color, &self.index_font_color]
            .into_iter()
            .flatten()
        {
            color.resolve_rgb()?;
        }
        self.fill_color.resolve()?;
        Ok(())
    }

    /// Header styling with `overrides` applied.
    pub(crate) fn header_style(&self, overrides: &StyleOverrides) -> IndexStyle {
        IndexStyle {
            fill: overrides.fill_header.unwrap_or(self.fill_header),
            bold: overrides.bold_header.unwrap_or(self.bold_header),
            font_size: overrides.header_font_size.or(self.header_font_size),
            font_color: overrides
                .header_font_color
                .clone()
                .or_else(|| self.header_font_color.clone()),
            ..self.shared_style(overrides)
        }
    }

    /// Index styling with `overrides` applied.
    pub(crate) fn index_style(&self, overrides: &StyleOverrides) -> IndexStyle {
        IndexStyle {
            fill: overrides.fill_index.unwrap_or(self.fill_index),
            bold: overrides.bold_index.unwrap_or(self.bold_index),
            font_size: overrides.index_font_size.or(self.index_font_size),
            font_color: overrides
                .index_font_color
                .clone()
                .or_else(|| self.index_font_color.clone()),
            ..self.shared_style(overrides)
        }
    }

    fn shared_style(&self, overrides: &StyleOverrides) -> IndexStyle {
        IndexStyle {
            fill_color: overrides
                .fill_color
                .clone()
                .unwrap_or_else(|| self.fill_color.clone()),
            merge_indices: overrides.merge_indices.unwrap_or(self.merge_indices),
            center_merge: overrides.center_merge.unwrap_or(self.center_merge),
            ..IndexStyle::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::common::style::ThemeColor;
    use crate::frame::label;

    #[test]
    fn test_defaults() {
        let options = TableOptions::default();
        assert!(!options.header && !options.index);
        assert_eq!(options.keep_names, KeepNames::Columns);
        assert_eq!(options.na_rep, " ");
        assert_eq!(options.column_totals_label.parts(), ["Total"]);
        assert_eq!(options.column_totals_method, AggFunc::Sum);
        assert!(options.fill_header && options.bold_header);
        assert!(!options.fill_index && options.bold_index);
        assert_eq!(options.fill_color, ColorSpec::Theme(ThemeColor::Accent1));
        assert!(options.row_banding && !options.column_banding);
        assert!(options.merge_indices && options.center_merge);
        assert!(!options.overwrite);
        options.validate().unwrap();
    }

    #[test]
    fn test_axis_and_keep_names_tokens() {
        assert_eq!("0".parse::<Axis>().unwrap(), Axis::Index);
        assert_eq!("columns".parse::<Axis>().unwrap(), Axis::Columns);
        assert!(matches!("rows".parse::<Axis>(), Err(Error::InvalidArgument(_))));
        assert_eq!("index".parse::<KeepNames>().unwrap(), KeepNames::Index);
        assert!(matches!("both".parse::<KeepNames>(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_totals_label_padding() {
        let label = TotalsLabel::default().to_label(3).unwrap();
        assert_eq!(label.as_slice(), [Value::text("Total"), Value::text(" "), Value::text(" ")]);
        assert!(TotalsLabel::new(["a", "b"]).to_label(1).is_err());
    }

    #[test]
    fn test_aggmap_lookup() {
        let aggmap = AggMap::new()
            .with(["North", "Q1"], AggFunc::Max)
            .with(["Units"], AggFunc::Count)
            .with(["Units"], AggFunc::Mean);
        assert_eq!(aggmap.get(&label(["North", "Q1"])), Some(&AggFunc::Max));
        assert_eq!(aggmap.get(&label(["North"])), None);
        assert_eq!(aggmap.get(&label(["Units"])), Some(&AggFunc::Mean));
        assert_eq!(aggmap.get(&label([2024])), None);
        assert_eq!(AggMap::new().with(["2024"], AggFunc::Min).get(&label([2024])), Some(&AggFunc::Min));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "
header: true
index: true
dtype_format:
  float: '{:,.2f}'
  datetime: '%b %Y'
column_totals: true
column_totals_label: [All, regions]
column_totals_aggmap:
  Margin: mean
fill_color: [31, 78, 121]
header_font_color: FFFFFF
";
        let options = TableOptions::from_yaml_str(yaml).unwrap();
        assert!(options.column_totals);
        assert_eq!(options.column_totals_label.parts(), ["All", "regions"]);
        assert_eq!(options.column_totals_aggmap.get(&label(["Margin"])), Some(&AggFunc::Mean));
        assert_eq!(options.dtype_format.unwrap().entries().len(), 2);
        assert_eq!(options.fill_color, ColorSpec::Rgb((31, 78, 121).into()));
        assert_eq!(options.header_font_color, Some(ColorSpec::Hex("FFFFFF".to_string())));
    }

    #[test]
    fn test_from_yaml_rejects_bad_values() {
        assert!(matches!(
            TableOptions::from_yaml_str("keep_names: both\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            TableOptions::from_yaml_str("index_font_size: 12\n"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            TableOptions::from_yaml_str("index: true\nindex_font_color: accent2\n"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "header: true\nrow_totals: true\nrow_totals_method: mean").unwrap();
        let options = TableOptions::from_yaml_file(file.path()).unwrap();
        assert!(options.header && options.row_totals);
        assert_eq!(options.row_totals_method, AggFunc::Mean);
    }

    #[test]
    fn test_style_overrides_win() {
        let options = TableOptions {
            header_font_size: Some(14.0),
            header: true,
            ..TableOptions::default()
        };
        let overrides = StyleOverrides {
            fill_header: Some(false),
            fill_color: Some(ColorSpec::from("#000000")),
            ..StyleOverrides::default()
        };
        let style = options.header_style(&overrides);
        assert!(!style.fill);
        assert!(style.bold);
        assert_eq!(style.font_size, Some(14.0));
        assert_eq!(style.fill_color, ColorSpec::Hex("#000000".to_string()));
        assert!(!overrides.requests_header_style());
        assert!(!options.index_style(&StyleOverrides::default()).fill);
    }
}
