// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tafelwerk-extract — Table extraction pipeline for the Tafelwerk engine.
//
// Turns one page of visual content (a standalone image or a selected PDF
// page) into zero or more normalized tabular datasets: orientation
// correction, OCR preprocessing (grayscale, contrast boost, binarization),
// delegation to an external table-detection engine, and header-promoting
// normalization of the raw table structures it returns.

pub mod image;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod table;

// Re-export the primary types so callers can use `tafelwerk_extract::TableExtractor` etc.
pub use self::image::preprocess::OcrPreprocessor;
pub use self::image::processor::ImageProcessor;
pub use ocr::orientation::{OrientationDetector, OrientationSignal};
pub use pdf::rasterize::{PageRasterizer, PageSelector};
pub use pipeline::TableExtractor;
pub use table::engine::TableEngine;
pub use table::normalize::normalize;

#[cfg(feature = "pdfium")]
pub use pdf::pdfium::PdfiumRasterizer;
