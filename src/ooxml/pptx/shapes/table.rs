/// Table shape implementation for PowerPoint presentations.
use bitflags::bitflags;

use crate::common::error::{Error, Result};
use crate::common::style::{Color, Length};
use crate::ooxml::pptx::shapes::textframe::TextFrame;

/// Style id of "Medium Style 2 - Accent 1", the style PowerPoint gives new tables.
pub const DEFAULT_TABLE_STYLE_ID: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";

bitflags! {
    /// Table-level style options (`a:tblPr` attributes).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TableFlags: u8 {
        /// `firstRow`: emphasize the first row
        const FIRST_ROW = 0b0000_0001;
        /// `firstCol`: emphasize the first column
        const FIRST_COL = 0b0000_0010;
        /// `lastRow`: emphasize the last row
        const LAST_ROW = 0b0000_0100;
        /// `lastCol`: emphasize the last column
        const LAST_COL = 0b0000_1000;
        /// `bandRow`: alternate row shading
        const BAND_ROW = 0b0001_0000;
        /// `bandCol`: alternate column shading
        const BAND_COL = 0b0010_0000;
    }
}

impl TableFlags {
    /// Every flag with its `a:tblPr` attribute name, in schema order.
    pub const ATTRIBUTES: [(TableFlags, &'static str); 6] = [
        (TableFlags::FIRST_ROW, "firstRow"),
        (TableFlags::FIRST_COL, "firstCol"),
        (TableFlags::LAST_ROW, "lastRow"),
        (TableFlags::LAST_COL, "lastCol"),
        (TableFlags::BAND_ROW, "bandRow"),
        (TableFlags::BAND_COL, "bandCol"),
    ];

    pub fn from_attribute(name: &[u8]) -> Option<Self> {
        Self::ATTRIBUTES
            .iter()
            .find(|(_, attr)| attr.as_bytes() == name)
            .map(|(flag, _)| *flag)
    }
}

impl Default for TableFlags {
    fn default() -> Self {
        TableFlags::FIRST_ROW | TableFlags::BAND_ROW
    }
}

/// A cell in a PowerPoint table (`a:tc`).
///
/// A cell that starts a merged range carries `row_span`/`grid_span` greater
/// than one; cells covered by the range are flagged `v_merge`/`h_merge`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    text_frame: TextFrame,
    fill: Option<Color>,
    row_span: u32,
    grid_span: u32,
    v_merge: bool,
    h_merge: bool,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            text_frame: TextFrame::new(),
            fill: None,
            row_span: 1,
            grid_span: 1,
            v_merge: false,
            h_merge: false,
        }
    }
}

impl TableCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text of the cell, paragraphs joined with line feeds.
    pub fn text(&self) -> String {
        self.text_frame.text()
    }

    /// Replace the cell text.
    pub fn set_text(&mut self, text: &str) {
        self.text_frame.set_text(text);
    }

    #[inline]
    pub fn text_frame(&self) -> &TextFrame {
        &self.text_frame
    }

    #[inline]
    pub fn text_frame_mut(&mut self) -> &mut TextFrame {
        &mut self.text_frame
    }

    /// Solid background fill, if any.
    #[inline]
    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn set_fill(&mut self, color: Color) {
        self.fill = Some(color);
    }

    pub fn clear_fill(&mut self) {
        self.fill = None;
    }

    #[inline]
    pub fn row_span(&self) -> u32 {
        self.row_span
    }

    #[inline]
    pub fn grid_span(&self) -> u32 {
        self.grid_span
    }

    pub fn set_row_span(&mut self, span: u32) {
        self.row_span = span.max(1);
    }

    pub fn set_grid_span(&mut self, span: u32) {
        self.grid_span = span.max(1);
    }

    /// Covered by a vertical merge that starts above.
    #[inline]
    pub fn v_merge(&self) -> bool {
        self.v_merge
    }

    /// Covered by a horizontal merge that starts to the left.
    #[inline]
    pub fn h_merge(&self) -> bool {
        self.h_merge
    }

    pub fn set_v_merge(&mut self, merged: bool) {
        self.v_merge = merged;
    }

    pub fn set_h_merge(&mut self, merged: bool) {
        self.h_merge = merged;
    }

    /// Top-left cell of a merged range.
    pub fn is_merge_origin(&self) -> bool {
        self.row_span > 1 || self.grid_span > 1
    }

    /// Covered by a merged range and not rendered.
    pub fn is_spanned(&self) -> bool {
        self.v_merge || self.h_merge
    }
}

/// A row in a PowerPoint table (`a:tr`).
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    height: Length,
    cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(height: Length, cells: Vec<TableCell>) -> Self {
        Self { height, cells }
    }

    #[inline]
    pub fn height(&self) -> Length {
        self.height
    }

    #[inline]
    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [TableCell] {
        &mut self.cells
    }
}

/// A table in a PowerPoint presentation.
///
/// Tables in PowerPoint are DrawingML tables (`a:tbl`) contained within
/// graphic frames. They contain rows, which contain cells.
///
/// # Examples
///
/// ```rust
/// use deckframe::common::Length;
/// use deckframe::ooxml::pptx::{Table, TableFlags};
///
/// let mut table = Table::new(2, 3, Length::from_inches(6.0), Length::from_inches(1.0)).unwrap();
/// table.cell_mut(0, 0).unwrap().set_text("Region");
///
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.column_count(), 3);
/// assert!(table.flags().contains(TableFlags::FIRST_ROW));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Length>,
    rows: Vec<TableRow>,
    flags: TableFlags,
    style_id: Option<String>,
}

impl Table {
    /// A `rows` x `cols` table filling `width` x `height`, split evenly.
    pub fn new(rows: usize, cols: usize, width: Length, height: Length) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidArgument(format!(
                "a table needs at least one row and one column, got {rows}x{cols}"
            )));
        }
        let rows = height
            .split(rows)
            .into_iter()
            .map(|h| TableRow::new(h, vec![TableCell::new(); cols]))
            .collect();
        Ok(Self {
            columns: width.split(cols),
            rows,
            flags: TableFlags::default(),
            style_id: Some(DEFAULT_TABLE_STYLE_ID.to_string()),
        })
    }

    pub(crate) fn from_parts(
        columns: Vec<Length>,
        rows: Vec<TableRow>,
        flags: TableFlags,
        style_id: Option<String>,
    ) -> Self {
        Self {
            columns,
            rows,
            flags,
            style_id,
        }
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of grid columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Grid column widths.
    #[inline]
    pub fn column_widths(&self) -> &[Length] {
        &self.columns
    }

    #[inline]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Zero-based cell access. Returns `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col))
    }

    /// Like [`Table::cell_mut`], failing with [`Error::Shape`] out of bounds.
    pub(crate) fn try_cell_mut(&mut self, row: usize, col: usize) -> Result<&mut TableCell> {
        let (rows, cols) = (self.row_count(), self.column_count());
        self.cell_mut(row, col).ok_or_else(|| {
            Error::Shape(format!(
                "cell ({row}, {col}) is outside a {rows}x{cols} table"
            ))
        })
    }

    /// Text of every cell, row by row.
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(TableCell::text).collect())
            .collect()
    }

    #[inline]
    pub fn flags(&self) -> TableFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: TableFlags) {
        self.flags = flags;
    }

    pub fn set_flag(&mut self, flag: TableFlags, enabled: bool) {
        self.flags.set(flag, enabled);
    }

    pub fn style_id(&self) -> Option<&str> {
        self.style_id.as_deref()
    }

    pub fn set_style_id(&mut self, style_id: Option<String>) {
        self.style_id = style_id;
    }
}
