//! Styling of rendered header rows, index columns and table flags.
use log::trace;

use crate::common::error::Result;
use crate::common::style::{Color, Length};
use crate::convert::merge::runs;
use crate::convert::options::{Axis, IndexStyle, StyleOverrides, TableOptions};
use crate::frame::Index;
use crate::ooxml::pptx::{Alignment, Table, TableFlags};

/// Position along `axis` of the cell for label level `level`.
#[inline]
fn position(axis: Axis, level: usize, i: usize) -> (usize, usize) {
    match axis {
        Axis::Index => (i, level),
        Axis::Columns => (level, i),
    }
}

/// Style the index columns (`Axis::Index`) or header rows (`Axis::Columns`)
/// of `table`.
///
/// Level `n` of `labels` is rendered in column `n` (or row `n`). Along the
/// axis, `cells` cells are styled; the labels start at cell `offset`, after
/// the rows (or columns) the other axis was folded into. Cells past the
/// labels, such as a totals row, are styled but never merged.
///
/// With `merge_indices`, each run of equal labels on a level becomes one
/// merged cell: the first cell spans the run and the others are marked as
/// merged into it. Levels merge independently of each other.
pub fn style_index(
    table: &mut Table,
    labels: &Index,
    axis: Axis,
    offset: usize,
    cells: usize,
    style: &IndexStyle,
) -> Result<()> {
    let fill = if style.fill {
        Some(style.fill_color.resolve()?)
    } else {
        None
    };
    let font_color = style
        .font_color
        .as_ref()
        .map(|c| c.resolve_rgb())
        .transpose()?;

    for n in 0..labels.nlevels() {
        if style.merge_indices {
            for span in runs(labels.level_values(n)).into_iter().filter(|s| s.is_merge()) {
                let first = offset + span.start;
                trace!("merging {axis} level {n}: {} cells from {first}", span.len);
                let (row, col) = position(axis, n, first);
                let origin = table.try_cell_mut(row, col)?;
                match axis {
                    Axis::Index => origin.set_row_span(span.len as u32),
                    Axis::Columns => origin.set_grid_span(span.len as u32),
                }
                if style.center_merge {
                    origin.text_frame_mut().first_paragraph_mut().alignment = Some(Alignment::Center);
                }
                for i in first + 1..offset + span.end() {
                    let (row, col) = position(axis, n, i);
                    let cell = table.try_cell_mut(row, col)?;
                    match axis {
                        Axis::Index => cell.set_v_merge(true),
                        Axis::Columns => cell.set_h_merge(true),
                    }
                }
            }
        }

        for i in 0..cells {
            let (row, col) = position(axis, n, i);
            let cell = table.try_cell_mut(row, col)?;
            if let Some(fill) = fill {
                cell.set_fill(fill);
            }
            let run = cell.text_frame_mut().first_run_mut();
            if let Some(size) = style.font_size {
                run.font.size = Some(Length::from_pt(size));
            }
            if let Some(rgb) = font_color {
                run.font.color = Some(Color::Rgb(rgb));
            }
            if style.bold {
                run.font.bold = Some(true);
            }
        }
    }
    Ok(())
}

/// Table-level style flags from `options` with `overrides` applied.
pub fn table_flags(options: &TableOptions, overrides: &StyleOverrides) -> TableFlags {
    let mut flags = TableFlags::empty();
    let settings = [
        (TableFlags::BAND_ROW, overrides.row_banding, options.row_banding),
        (TableFlags::BAND_COL, overrides.column_banding, options.column_banding),
        (TableFlags::FIRST_ROW, overrides.first_row, options.first_row),
        (TableFlags::FIRST_COL, overrides.first_col, options.first_col),
        (TableFlags::LAST_ROW, overrides.last_row, options.last_row),
        (TableFlags::LAST_COL, overrides.last_col, options.last_col),
    ];
    for (flag, overridden, configured) in settings {
        flags.set(flag, overridden.unwrap_or(configured));
    }
    flags
}
