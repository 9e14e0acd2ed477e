//! The data frame to table conversion pipeline.
use log::{debug, warn};

use crate::common::error::{Error, Result};
use crate::common::style::{Color, Length};
use crate::convert::format::{format_index, format_values};
use crate::convert::options::{Axis, IndexStyle, StyleOverrides, TableOptions};
use crate::convert::style::{self, table_flags};
use crate::convert::totals::add_totals;
use crate::convert::transform::transform;
use crate::frame::{DataFrame, Value};
use crate::ooxml::pptx::{Shape, Table};

/// Result of inserting a table into the target shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new table replaced the shape's content
    Inserted,
    /// The shape already held a table and overwriting was not requested;
    /// the shape is unchanged
    Skipped,
}

/// Output of [`TableConverter::convert`].
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Exactly the grid written into the table, one text value per cell
    pub data: DataFrame,
    pub insert: InsertOutcome,
}

/// Renders a data frame into a table placeholder.
///
/// The converter borrows the data frame, which is never modified, and the
/// target shape, which receives the table.
///
/// # Examples
///
/// ```rust
/// use deckframe::convert::{KeepNames, TableConverter, TableOptions};
/// use deckframe::frame::{DataFrame, Index, Value};
/// use deckframe::ooxml::pptx::Presentation;
///
/// let data = DataFrame::from_columns(vec![
///     ("Units", vec![Value::Int(3), Value::Int(4)]),
///     ("Price", vec![Value::Float(2.5), Value::Null]),
/// ])
/// .unwrap()
/// .with_index(Index::new(["North", "South"]).with_name("Region"))
/// .unwrap();
///
/// let mut pres = Presentation::new();
/// let slide = pres.add_slide("Title and Content").unwrap();
/// let shape = slide.placeholder_mut(1).unwrap();
///
/// let options = TableOptions {
///     header: true,
///     index: true,
///     keep_names: KeepNames::Index,
///     column_totals: true,
///     ..TableOptions::default()
/// };
/// let rendered = TableConverter::new(shape, &data, options).unwrap().convert().unwrap();
///
/// assert_eq!(rendered.data.shape(), (4, 3));
/// let table = slide.placeholder(1).unwrap().table().unwrap();
/// assert_eq!(table.texts()[0], ["Region", "Units", "Price"]);
/// assert_eq!(table.texts()[3], ["Total", "7", "2.5"]);
/// ```
pub struct TableConverter<'a> {
    shape: &'a mut Shape,
    data: &'a DataFrame,
    options: TableOptions,
}

impl<'a> TableConverter<'a> {
    /// Create a converter after validating `options`.
    pub fn new(shape: &'a mut Shape, data: &'a DataFrame, options: TableOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            shape,
            data,
            options,
        })
    }

    #[inline]
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        self.shape
    }

    #[inline]
    pub fn data(&self) -> &DataFrame {
        self.data
    }

    /// Append a totals row (`Axis::Index`) or column (`Axis::Columns`) to
    /// `data` with the configured label, method and aggregation overrides.
    pub fn add_totals(&self, data: &DataFrame, axis: Axis) -> Result<DataFrame> {
        let o = &self.options;
        match axis {
            Axis::Index => add_totals(
                data,
                &o.column_totals_label,
                &o.column_totals_method,
                &o.column_totals_aggmap,
                axis,
            ),
            Axis::Columns => add_totals(
                data,
                &o.row_totals_label,
                &o.row_totals_method,
                &o.row_totals_aggmap,
                axis,
            ),
        }
    }

    /// Fold the header and index into `data` as configured.
    pub fn transform(&self, data: &DataFrame) -> Result<DataFrame> {
        transform(data, self.options.header, self.options.index, self.options.keep_names)
    }

    pub fn format_index(&self, data: &DataFrame, axis: Axis) -> Result<DataFrame> {
        format_index(data, self.options.dtype_format.as_ref(), axis)
    }

    pub fn format_values(&self, data: &DataFrame) -> Result<DataFrame> {
        format_values(data, self.options.dtype_format.as_ref(), &self.options.na_rep)
    }

    /// Rows and columns of the rendered grid, totals included.
    fn grid_size(&self) -> Result<(usize, usize)> {
        let (mut rows, mut cols) = self.transform(self.data)?.shape();
        if self.options.column_totals {
            rows += 1;
        }
        if self.options.row_totals {
            cols += 1;
        }
        Ok((rows, cols))
    }

    /// Insert a table sized to the rendered grid into the shape.
    ///
    /// A shape that already holds a table is left untouched unless
    /// `overwrite` is set.
    pub fn insert_table(&mut self, overwrite: bool) -> Result<InsertOutcome> {
        if self.shape.has_table() && !overwrite {
            warn!(
                "shape {:?} already contains a table graphic frame; skipping insertion",
                self.shape.name()
            );
            return Ok(InsertOutcome::Skipped);
        }
        let (rows, cols) = self.grid_size()?;
        self.shape.insert_table(rows, cols)?;
        debug!("inserted a {rows}x{cols} table into shape {:?}", self.shape.name());
        Ok(InsertOutcome::Inserted)
    }

    fn table_mut(&mut self) -> Result<&mut Table> {
        let name = self.shape.name().to_string();
        self.shape.table_mut().ok_or_else(|| {
            Error::InvalidArgument(format!("shape {name:?} has no table; insert one first"))
        })
    }

    /// Style the header rows (`Axis::Columns`) or index columns
    /// (`Axis::Index`) of the inserted table.
    pub fn style_index(&mut self, axis: Axis, style: &IndexStyle) -> Result<()> {
        let labels = self.format_index(self.data, axis)?;
        let labels = match axis {
            Axis::Index => labels.index().clone(),
            Axis::Columns => labels.columns().clone(),
        };
        let (rows, cols) = self.transform(self.data)?.shape();
        let (offset, cells) = match axis {
            Axis::Index => (
                rows - labels.len(),
                rows + usize::from(self.options.column_totals),
            ),
            Axis::Columns => (
                cols - labels.len(),
                cols + usize::from(self.options.row_totals),
            ),
        };
        debug!(
            "styling {axis}: {} level(s), labels from cell {offset}, {cells} cells",
            labels.nlevels()
        );
        style::style_index(self.table_mut()?, &labels, axis, offset, cells, style)
    }

    /// Apply the configured header, index and table styling.
    pub fn style_table(&mut self) -> Result<()> {
        self.style_table_with(&StyleOverrides::default())
    }

    /// Apply header, index and table styling with `overrides` taking
    /// precedence over the configured options.
    pub fn style_table_with(&mut self, overrides: &StyleOverrides) -> Result<()> {
        if overrides.requests_header_style() && !self.options.header {
            return Err(Error::InvalidArgument(
                "cannot style the header when it is not rendered; set header to true".to_string(),
            ));
        }
        if overrides.requests_index_style() && !self.options.index {
            return Err(Error::InvalidArgument(
                "cannot style the index when it is not rendered; set index to true".to_string(),
            ));
        }

        if self.options.header {
            let style = self.options.header_style(overrides);
            self.style_index(Axis::Columns, &style)?;
        }
        if self.options.index {
            let style = self.options.index_style(overrides);
            self.style_index(Axis::Index, &style)?;
        }

        let flags = table_flags(&self.options, overrides);
        self.table_mut()?.set_flags(flags);
        Ok(())
    }

    /// Run the whole pipeline and return the rendered grid.
    ///
    /// Labels are formatted, totals added on the raw values, values
    /// formatted, and the header and index folded before the table is
    /// inserted and written. When insertion is skipped the rendered grid is
    /// still returned and the shape is left as it was.
    pub fn convert(&mut self) -> Result<Rendered> {
        let mut data = self.format_index(self.data, Axis::Index)?;
        data = self.format_index(&data, Axis::Columns)?;
        if self.options.column_totals {
            data = self.add_totals(&data, Axis::Index)?;
        }
        if self.options.row_totals {
            data = self.add_totals(&data, Axis::Columns)?;
        }
        data = self.format_values(&data)?;
        data = self.transform(&data)?;
        data = data.fill_null(&Value::text(self.options.na_rep.as_str()));
        debug!("rendered grid is {}x{}", data.nrows(), data.ncols());

        let insert = self.insert_table(self.options.overwrite)?;
        if insert == InsertOutcome::Skipped {
            return Ok(Rendered { data, insert });
        }

        self.write_cells(&data)?;
        self.style_table()?;
        Ok(Rendered { data, insert })
    }

    fn write_cells(&mut self, data: &DataFrame) -> Result<()> {
        let size = self.options.font_size.map(Length::from_pt);
        let color = self
            .options
            .font_color
            .as_ref()
            .map(|c| c.resolve_rgb())
            .transpose()?
            .map(Color::Rgb);
        let name = self.options.font_name.clone();

        let table = self.table_mut()?;
        if (table.row_count(), table.column_count()) != data.shape() {
            return Err(Error::Shape(format!(
                "table is {}x{} but the rendered grid is {}x{}",
                table.row_count(),
                table.column_count(),
                data.nrows(),
                data.ncols()
            )));
        }
        for (r, row) in data.rows().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let cell = table.try_cell_mut(r, c)?;
                cell.set_text(&value.to_text());
                let run = cell.text_frame_mut().first_run_mut();
                if size.is_some() {
                    run.font.size = size;
                }
                if color.is_some() {
                    run.font.color = color;
                }
                if name.is_some() {
                    run.font.name.clone_from(&name);
                }
            }
        }
        Ok(())
    }
}
