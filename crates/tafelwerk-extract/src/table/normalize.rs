// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Table normalization — turns a raw detection-engine table structure into a
// clean, header-promoted tabular dataset.

use tafelwerk_core::{RawTable, TabularDataset};
use tracing::{debug, instrument, warn};

/// Normalize one raw table structure into a [`TabularDataset`].
///
/// 1. Materialize the rows in ascending row-index order.
/// 2. A table with no rows, or whose first row has no cells, yields an
///    empty dataset (no header) with a diagnostic — never an error.
/// 3. The first row is promoted to the column headers; all later rows
///    become data rows.
/// 4. Embedded line breaks in headers and cells are replaced by a single
///    space.
///
/// Ragged input is coerced rather than rejected: data rows shorter than the
/// header are padded with empty cells, longer rows are truncated to the
/// header width.
#[instrument(skip_all, fields(rows = raw.row_count()))]
pub fn normalize(raw: &RawTable) -> TabularDataset {
    let mut rows = raw.rows();

    let Some(header_cells) = rows.next() else {
        warn!("Detected table has no rows; returning empty dataset");
        return TabularDataset::empty();
    };

    if header_cells.is_empty() {
        warn!("Detected table has no columns; returning empty dataset");
        return TabularDataset::empty();
    }

    let headers: Vec<String> = header_cells
        .iter()
        .map(|cell| flatten_line_breaks(&cell.value))
        .collect();
    let width = headers.len();

    let mut coerced = 0usize;
    let data_rows: Vec<Vec<String>> = rows
        .map(|cells| {
            let mut row: Vec<String> = cells
                .iter()
                .take(width)
                .map(|cell| flatten_line_breaks(&cell.value))
                .collect();
            if cells.len() != width {
                coerced += 1;
            }
            row.resize(width, String::new());
            row
        })
        .collect();

    if coerced > 0 {
        warn!(coerced, width, "Ragged rows coerced to header width");
    }

    debug!(
        columns = width,
        data_rows = data_rows.len(),
        "Table normalized"
    );

    TabularDataset {
        headers,
        rows: data_rows,
    }
}

/// Replace every embedded newline with a single space.
fn flatten_line_breaks(value: &str) -> String {
    value.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tafelwerk_core::Cell;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect::<Vec<_>>()),
        )
    }

    #[test]
    fn promotes_first_row_to_headers() {
        let raw = table(&[&["Name", "Age"], &["Ada", "36"], &["Noether", "53"]]);
        let dataset = normalize(&raw);
        assert_eq!(dataset.headers, ["Name", "Age"]);
        assert_eq!(dataset.rows, [["Ada", "36"], ["Noether", "53"]]);
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn replaces_line_breaks_with_spaces() {
        let raw = table(&[&["Name", "Age"], &["A\nB", "30"]]);
        let dataset = normalize(&raw);
        assert_eq!(dataset.headers, ["Name", "Age"]);
        assert_eq!(dataset.rows[0], ["A B", "30"]);
    }

    #[test]
    fn line_breaks_in_headers_are_flattened_too() {
        let raw = table(&[&["Full\nName"], &["Ada"]]);
        let dataset = normalize(&raw);
        assert_eq!(dataset.headers, ["Full Name"]);
    }

    #[test]
    fn empty_table_yields_empty_dataset() {
        let dataset = normalize(&RawTable::new());
        assert!(dataset.is_empty());
        assert!(dataset.headers.is_empty());
    }

    #[test]
    fn header_row_without_cells_yields_empty_dataset() {
        let mut raw = RawTable::new();
        raw.push_row(Vec::new());
        let dataset = normalize(&raw);
        assert!(dataset.is_empty());
    }

    #[test]
    fn header_only_table_has_no_data_rows() {
        let raw = table(&[&["Name", "Age"]]);
        let dataset = normalize(&raw);
        assert_eq!(dataset.headers, ["Name", "Age"]);
        assert!(dataset.rows.is_empty());
    }

    #[test]
    fn short_rows_are_padded_to_header_width() {
        let raw = table(&[&["A", "B", "C"], &["1"]]);
        let dataset = normalize(&raw);
        assert_eq!(dataset.rows[0], ["1", "", ""]);
    }

    #[test]
    fn long_rows_are_truncated_to_header_width() {
        let raw = table(&[&["A", "B"], &["1", "2", "3", "4"]]);
        let dataset = normalize(&raw);
        assert_eq!(dataset.rows[0], ["1", "2"]);
    }

    #[test]
    fn blank_cells_survive_as_empty_strings() {
        let mut raw = RawTable::new();
        raw.push_row(vec![Cell::new("H1"), Cell::new("H2")]);
        raw.push_row(vec![Cell::default(), Cell::new("x")]);
        let dataset = normalize(&raw);
        assert_eq!(dataset.rows[0], ["", "x"]);
    }

    #[test]
    fn non_contiguous_row_indices_keep_order() {
        let mut raw = RawTable::new();
        raw.content.insert(10, vec![Cell::new("Name")]);
        raw.content.insert(20, vec![Cell::new("Ada")]);
        let dataset = normalize(&raw);
        assert_eq!(dataset.headers, ["Name"]);
        assert_eq!(dataset.rows, [["Ada"]]);
    }
}
