// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding, rotation, contrast adjustment, and the fixed OCR
// preprocessing sequence.

pub mod preprocess;
pub mod processor;

pub use preprocess::OcrPreprocessor;
pub use processor::ImageProcessor;
