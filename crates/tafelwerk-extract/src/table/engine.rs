// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External table-detection engine contract.

use tafelwerk_core::RawTable;
use tafelwerk_core::config::DetectionOptions;
use tafelwerk_core::error::TafelwerkError;

/// Contract for the external table-structure-detection engine.
///
/// The engine receives the preprocessed page as a JPEG byte buffer (the
/// pipeline's stable intermediate format) together with the fixed
/// [`DetectionOptions`], and returns zero or more raw table structures in
/// its natural detection order. Tables scoring below
/// `options.min_confidence` are discarded by the engine itself.
///
/// The detection algorithm (cell-grid inference, bordered vs. borderless
/// classification, confidence scoring) is entirely the engine's concern;
/// this crate only normalizes whatever it returns.
pub trait TableEngine {
    /// Detect table structures on the given page image.
    fn detect_tables(
        &self,
        jpeg_bytes: &[u8],
        options: &DetectionOptions,
    ) -> Result<Vec<RawTable>, TafelwerkError>;
}
