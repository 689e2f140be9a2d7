// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Tafelwerk extraction pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A quarter-turn rotation applied to bring a page upright.
///
/// Orientation engines report how far a page is rotated *clockwise from
/// upright*; the corrective rotation is the inverse. Values outside the
/// quarter-turn set carry no confident signal and map to `Deg0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationAngle {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl RotationAngle {
    /// Map a raw detected rotation to the corrective rotation.
    ///
    /// A page reported as rotated 90° clockwise needs a 270° clockwise turn
    /// (i.e. 90° counter-clockwise) to come back upright, and vice versa.
    /// Unrecognised values mean the engine had no confident signal, so no
    /// correction is applied.
    pub fn from_detected(detected: u32) -> Self {
        match detected {
            0 => Self::Deg0,
            90 => Self::Deg270,
            180 => Self::Deg180,
            270 => Self::Deg90,
            _ => Self::Deg0,
        }
    }

    /// The rotation in clockwise degrees.
    pub fn degrees(&self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// True when no rotation is needed.
    pub fn is_upright(&self) -> bool {
        matches!(self, Self::Deg0)
    }
}

impl Default for RotationAngle {
    fn default() -> Self {
        Self::Deg0
    }
}

impl std::fmt::Display for RotationAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// A single table cell as reported by the detection engine.
///
/// The value may be empty (blank cell) or contain embedded line breaks when
/// the engine recognised wrapped text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Recognised text content of this cell.
    pub value: String,
}

impl Cell {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Raw table structure returned by the table-detection engine.
///
/// An ordered mapping from row index to the cells of that row, left to
/// right. Row indices need not be contiguous; iteration order is always
/// ascending. Consumed exactly once by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// Row index → ordered cells for that row.
    pub content: BTreeMap<u32, Vec<Cell>>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from already-ordered rows of string values.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = String>,
    {
        let content = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                (
                    idx as u32,
                    row.into_iter().map(Cell::new).collect::<Vec<_>>(),
                )
            })
            .collect();
        Self { content }
    }

    /// Append a row at the next free index.
    pub fn push_row(&mut self, cells: Vec<Cell>) {
        let next = self
            .content
            .last_key_value()
            .map(|(k, _)| k + 1)
            .unwrap_or(0);
        self.content.insert(next, cells);
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.content.len()
    }

    /// True when the engine reported no rows at all.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Iterate rows in ascending row-index order.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<Cell>> {
        self.content.values()
    }
}

/// Normalized tabular output: a header row plus rectangular data rows.
///
/// Invariant: every data row has exactly `headers.len()` columns. A dataset
/// with no headers and no rows represents a degenerate detection (empty
/// table) and is valid output, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularDataset {
    /// Column labels, promoted from the table's first row.
    pub headers: Vec<String>,
    /// Data rows, each exactly as wide as `headers`.
    pub rows: Vec<Vec<String>>,
}

impl TabularDataset {
    /// An empty dataset with no header — the degenerate-detection result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of columns, as inherited from the header row.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the dataset carries neither headers nor rows.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_inverts_detected_rotation() {
        assert_eq!(RotationAngle::from_detected(0), RotationAngle::Deg0);
        assert_eq!(RotationAngle::from_detected(90), RotationAngle::Deg270);
        assert_eq!(RotationAngle::from_detected(180), RotationAngle::Deg180);
        assert_eq!(RotationAngle::from_detected(270), RotationAngle::Deg90);
    }

    #[test]
    fn unrecognised_detection_maps_to_no_correction() {
        for raw in [1u32, 45, 91, 359, 360, 540, u32::MAX] {
            assert_eq!(RotationAngle::from_detected(raw), RotationAngle::Deg0);
        }
    }

    #[test]
    fn rotation_degrees_round_trip() {
        for angle in [
            RotationAngle::Deg0,
            RotationAngle::Deg90,
            RotationAngle::Deg180,
            RotationAngle::Deg270,
        ] {
            // degrees() reports the corrective turn itself, not a detection,
            // so feeding it back through from_detected must invert again.
            let twice = RotationAngle::from_detected(angle.degrees());
            assert_eq!(twice.degrees(), (360 - angle.degrees()) % 360);
        }
    }

    #[test]
    fn raw_table_preserves_row_order() {
        let mut table = RawTable::new();
        table.content.insert(2, vec![Cell::new("third")]);
        table.content.insert(0, vec![Cell::new("first")]);
        table.content.insert(1, vec![Cell::new("second")]);

        let values: Vec<&str> = table
            .rows()
            .map(|row| row[0].value.as_str())
            .collect();
        assert_eq!(values, ["first", "second", "third"]);
    }

    #[test]
    fn push_row_appends_after_highest_index() {
        let mut table = RawTable::new();
        table.content.insert(5, vec![Cell::new("a")]);
        table.push_row(vec![Cell::new("b")]);
        assert_eq!(table.row_count(), 2);
        assert!(table.content.contains_key(&6));
    }

    #[test]
    fn empty_dataset_has_no_columns() {
        let dataset = TabularDataset::empty();
        assert!(dataset.is_empty());
        assert_eq!(dataset.column_count(), 0);
        assert_eq!(dataset.row_count(), 0);
    }
}
