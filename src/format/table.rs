//! Table layout.
//!
//! Rows are padded to a common column count, every column is as wide as its
//! widest cell and cells are joined by [`COLUMN_SEPARATOR`].

use crate::chunk::TextChunk;
use crate::text::{pad_center, pad_left, pad_right};

use super::align::Align;

/// Separator between table cells.
pub const COLUMN_SEPARATOR: &str = "  ";

/// Pad ragged rows with empty chunks so every row has the same length.
#[must_use]
pub fn normalize_rows(mut rows: Vec<Vec<TextChunk>>) -> Vec<Vec<TextChunk>> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    for (index, row) in rows.iter_mut().enumerate() {
        if row.len() < columns {
            log::debug!(
                "table row {index} has {} of {columns} cells, padding",
                row.len()
            );
            row.resize_with(columns, TextChunk::empty);
        }
    }
    rows
}

/// Visible width of each column.
#[must_use]
pub fn column_widths(rows: &[Vec<TextChunk>]) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        if widths.len() < row.len() {
            widths.resize(row.len(), 0);
        }
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.visible_length());
        }
    }
    widths
}

/// Pad one cell to its column width.
///
/// Right alignment pads on the left and center splits the padding; every
/// other method pads on the right.
#[must_use]
pub fn pad_cell(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Right => pad_left(text, width),
        Align::Center => pad_center(text, width),
        Align::Left | Align::Justify | Align::CenterBlock => pad_right(text, width),
    }
}

/// Render rows into lines joined by `\n`.
pub(crate) fn render_rows(rows: Vec<Vec<TextChunk>>, align: Align) -> String {
    let rows = normalize_rows(rows);
    let widths = column_widths(&rows);
    rows.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, &width)| cell.with_text(pad_cell(&cell.text, width, align)).render())
                .collect::<Vec<_>>()
                .join(COLUMN_SEPARATOR)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
