// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Fixed configuration handed to the external table-detection engine.
///
/// These values are part of the engine contract rather than a user-facing
/// tuning surface; callers normally rely on `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionOptions {
    /// Thread-count hint passed opaquely to the engine.
    pub n_threads: u32,
    /// OCR language code (ISO 639-2).
    pub lang: String,
    /// Recover implicit (unruled) rows inside detected tables.
    pub implicit_rows: bool,
    /// Attempt detection of tables without visible borders.
    pub borderless_tables: bool,
    /// Minimum per-table confidence (0-100) below which a detection is
    /// discarded by the engine.
    pub min_confidence: u8,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            n_threads: 1,
            lang: "eng".to_string(),
            implicit_rows: false,
            borderless_tables: false,
            min_confidence: 50,
        }
    }
}

/// Settings for one extraction pipeline instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Ask the orientation engine for a skew estimate and undo it before
    /// preprocessing. When false the orientation engine is never invoked.
    pub auto_rotation: bool,
    /// Options forwarded to the table-detection engine.
    pub detection: DetectionOptions,
    /// Decode images without pixel-count safety limits. Scanned documents
    /// routinely exceed the decoder's default decompression bounds, so this
    /// defaults to true; set false when inputs are untrusted.
    pub allow_large_images: bool,
    /// Quality (1-100) of the intermediate JPEG buffer handed to the engine.
    pub jpeg_quality: u8,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            auto_rotation: false,
            detection: DetectionOptions::default(),
            allow_large_images: true,
            jpeg_quality: 90,
        }
    }
}
