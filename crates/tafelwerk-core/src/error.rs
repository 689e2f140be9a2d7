// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Tafelwerk.

use thiserror::Error;

/// Top-level error type for all Tafelwerk operations.
#[derive(Debug, Error)]
pub enum TafelwerkError {
    // -- Image errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- PDF errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("page {requested} out of range (document has {available} pages)")]
    PageOutOfRange { requested: usize, available: usize },

    // -- External engine errors --
    #[error("table detection failed: {0}")]
    DetectionError(String),

    #[error("orientation detection failed: {0}")]
    OrientationError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TafelwerkError>;
