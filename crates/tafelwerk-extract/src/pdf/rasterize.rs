// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasterization contract and 1-based page selection. The rasterizer
// renders the whole document in one call; no partial or streaming
// rasterization is assumed.

use image::DynamicImage;
use tafelwerk_core::error::TafelwerkError;
use tracing::{debug, instrument};

/// Contract for the external PDF rasterizer.
///
/// Given raw PDF bytes, produces one raster image per page, in document
/// order. Position `i` in the returned sequence is page `i + 1`.
///
/// The pipeline is fully synchronous and single-threaded, so implementations
/// need not be thread-safe (pdfium itself is not).
pub trait PageRasterizer {
    /// Render every page of the document to an image.
    fn rasterize(&self, pdf_bytes: &[u8]) -> Result<Vec<DynamicImage>, TafelwerkError>;
}

/// Selects a single page image out of a rasterized document.
pub struct PageSelector {
    rasterizer: Box<dyn PageRasterizer>,
}

impl PageSelector {
    pub fn new(rasterizer: Box<dyn PageRasterizer>) -> Self {
        Self { rasterizer }
    }

    /// Rasterize the document and return the page at the 1-based index.
    ///
    /// # Errors
    ///
    /// [`TafelwerkError::PageOutOfRange`] when `page_number` is 0 or exceeds
    /// the page count; rasterizer failures pass through unchanged.
    #[instrument(skip_all, fields(pdf_len = pdf_bytes.len(), page_number))]
    pub fn select_page(
        &self,
        pdf_bytes: &[u8],
        page_number: usize,
    ) -> Result<DynamicImage, TafelwerkError> {
        let pages = self.rasterizer.rasterize(pdf_bytes)?;
        debug!(page_count = pages.len(), "Document rasterized");

        if page_number == 0 || page_number > pages.len() {
            return Err(TafelwerkError::PageOutOfRange {
                requested: page_number,
                available: pages.len(),
            });
        }

        let mut pages = pages;
        Ok(pages.swap_remove(page_number - 1))
    }
}
