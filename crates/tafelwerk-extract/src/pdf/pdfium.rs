// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pdfium-backed page rasterizer.
//
// Renders every page of a PDF to a raster image via the `pdfium-render`
// bindings. Requires the pdfium shared library at runtime: either alongside
// the executable or installed system-wide.
//
// Only compiled when the `pdfium` feature is enabled:
//
// ```toml
// tafelwerk-extract = { version = "0.1", features = ["pdfium"] }
// ```

use image::DynamicImage;
use pdfium_render::prelude::*;
use tafelwerk_core::error::TafelwerkError;
use tracing::{debug, info, instrument};

use crate::pdf::rasterize::PageRasterizer;

/// Default resolution for rendering PDF pages, in dots per inch.
///
/// 200 DPI is enough for table-grid and OCR work on typical scans; raise it
/// for very dense pages at the cost of memory.
pub const DEFAULT_RASTER_DPI: f32 = 200.0;

/// PDF rasterizer backed by the pdfium library.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
    dpi: f32,
}

impl PdfiumRasterizer {
    /// Bind to pdfium and rasterize at [`DEFAULT_RASTER_DPI`].
    pub fn new() -> Result<Self, TafelwerkError> {
        Self::with_dpi(DEFAULT_RASTER_DPI)
    }

    /// Bind to pdfium with an explicit rendering resolution.
    ///
    /// Looks for the pdfium shared library next to the executable first,
    /// then falls back to the system library.
    #[instrument]
    pub fn with_dpi(dpi: f32) -> Result<Self, TafelwerkError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|err| {
                TafelwerkError::PdfError(format!("failed to bind pdfium library: {}", err))
            })?;

        info!(dpi, "Pdfium bound");
        Ok(Self {
            pdfium: Pdfium::new(bindings),
            dpi,
        })
    }
}

impl PageRasterizer for PdfiumRasterizer {
    #[instrument(skip_all, fields(pdf_len = pdf_bytes.len()))]
    fn rasterize(&self, pdf_bytes: &[u8]) -> Result<Vec<DynamicImage>, TafelwerkError> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(|err| {
                TafelwerkError::PdfError(format!("failed to load PDF from memory: {}", err))
            })?;

        let page_count = document.pages().len();
        debug!(page_count, "PDF loaded");

        // PDF user-space units are 72 per inch.
        let scale = self.dpi / 72.0;

        let mut images = Vec::with_capacity(page_count as usize);
        for (index, page) in document.pages().iter().enumerate() {
            let pixel_width = (page.width().value * scale) as i32;
            let pixel_height = (page.height().value * scale) as i32;

            let bitmap = page
                .render_with_config(
                    &PdfRenderConfig::new()
                        .set_target_width(pixel_width)
                        .set_target_height(pixel_height),
                )
                .map_err(|err| {
                    TafelwerkError::PdfError(format!(
                        "failed to render page {}: {}",
                        index + 1,
                        err
                    ))
                })?;

            images.push(bitmap.as_image());
        }

        debug!(rendered = images.len(), "Rasterization complete");
        Ok(images)
    }
}
