// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — full-document rasterization and 1-based page selection.

pub mod rasterize;

#[cfg(feature = "pdfium")]
pub mod pdfium;

pub use rasterize::{PageRasterizer, PageSelector};

#[cfg(feature = "pdfium")]
pub use pdfium::PdfiumRasterizer;
