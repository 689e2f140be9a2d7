// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline orchestration — composes page selection, orientation correction,
// preprocessing, detection, and normalization into the two extraction entry
// points (image-first and PDF-first).

use image::DynamicImage;
use tafelwerk_core::{ExtractConfig, RotationAngle, TabularDataset};
use tafelwerk_core::error::TafelwerkError;
use tracing::{debug, info, instrument, warn};

use crate::image::preprocess::OcrPreprocessor;
use crate::image::processor::ImageProcessor;
use crate::ocr::orientation::{OrientationDetector, OrientationSignal};
use crate::pdf::rasterize::{PageRasterizer, PageSelector};
use crate::table::engine::TableEngine;
use crate::table::normalize::normalize;

/// End-to-end table extractor for single pages of visual content.
///
/// Owns the external collaborators (table-detection engine, optional
/// orientation signal, optional PDF rasterizer) and runs the full chain:
/// decode → orientation correction → preprocess → JPEG re-encode → detect →
/// normalize. Every call runs synchronously to completion; intermediate
/// buffers live only for the duration of the call.
///
/// ```ignore
/// let extractor = TableExtractor::new(Box::new(engine))
///     .with_orientation_signal(Box::new(osd))
///     .with_config(ExtractConfig { auto_rotation: true, ..Default::default() });
/// let tables = extractor.extract_from_image_path("scan.png")?;
/// ```
pub struct TableExtractor {
    engine: Box<dyn TableEngine>,
    orientation: Option<OrientationDetector>,
    selector: Option<PageSelector>,
    config: ExtractConfig,
}

impl TableExtractor {
    /// Create an extractor around a table-detection engine, with default
    /// configuration and no orientation or PDF support.
    pub fn new(engine: Box<dyn TableEngine>) -> Self {
        Self {
            engine,
            orientation: None,
            selector: None,
            config: ExtractConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ExtractConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach an orientation signal, enabling auto-rotation when the
    /// configuration asks for it.
    pub fn with_orientation_signal(mut self, signal: Box<dyn OrientationSignal>) -> Self {
        self.orientation = Some(OrientationDetector::new(signal));
        self
    }

    /// Attach a PDF rasterizer, enabling the PDF entry points.
    pub fn with_rasterizer(mut self, rasterizer: Box<dyn PageRasterizer>) -> Self {
        self.selector = Some(PageSelector::new(rasterizer));
        self
    }

    // -- Image entry point ------------------------------------------------

    /// Extract tables from an image file on disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn extract_from_image_path(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Vec<TabularDataset>, TafelwerkError> {
        let data = std::fs::read(path.as_ref())?;
        self.extract_from_image_bytes(&data)
    }

    /// Extract tables from encoded image bytes (JPEG, PNG, TIFF, etc.).
    ///
    /// Decode failures are fatal for the call; everything downstream favours
    /// returning an empty result over raising.
    #[instrument(skip_all, fields(data_len = data.len()))]
    pub fn extract_from_image_bytes(
        &self,
        data: &[u8],
    ) -> Result<Vec<TabularDataset>, TafelwerkError> {
        let image = ImageProcessor::from_bytes(data, self.config.allow_large_images)?
            .to_rgb()
            .into_dynamic();
        self.run_page_pipeline(image, self.config.auto_rotation)
    }

    // -- PDF entry point ----------------------------------------------------

    /// Extract tables from one page of a PDF file on disk (1-based index).
    #[instrument(skip_all, fields(path = %path.as_ref().display(), page_number))]
    pub fn extract_from_pdf_path(
        &self,
        path: impl AsRef<std::path::Path>,
        page_number: usize,
    ) -> Result<Vec<TabularDataset>, TafelwerkError> {
        let data = std::fs::read(path.as_ref())?;
        self.extract_from_pdf_bytes(&data, page_number)
    }

    /// Extract tables from one page of an in-memory PDF (1-based index).
    ///
    /// An out-of-range page number yields an empty result with a warning,
    /// consistent with the empty-table policy elsewhere in the pipeline.
    /// Rasterization failures (unreadable PDF bytes) are fatal for the call.
    #[instrument(skip_all, fields(pdf_len = pdf_bytes.len(), page_number))]
    pub fn extract_from_pdf_bytes(
        &self,
        pdf_bytes: &[u8],
        page_number: usize,
    ) -> Result<Vec<TabularDataset>, TafelwerkError> {
        let selector = self.selector.as_ref().ok_or_else(|| {
            TafelwerkError::PdfError("no page rasterizer configured".to_string())
        })?;

        let page = match selector.select_page(pdf_bytes, page_number) {
            Ok(page) => page,
            Err(TafelwerkError::PageOutOfRange {
                requested,
                available,
            }) => {
                warn!(
                    requested,
                    available, "Page out of range; returning no tables"
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        // Orientation is corrected on the raw page, then the rotated page is
        // re-encoded and fed through the image pipeline with rotation off, so
        // the correction is never applied twice.
        let correction = self.correction_for(&page);
        let jpeg = ImageProcessor::from_dynamic(page)
            .rotate_quarter(correction)
            .to_jpeg_bytes(self.config.jpeg_quality)?;

        let image = ImageProcessor::from_bytes(&jpeg, self.config.allow_large_images)?
            .to_rgb()
            .into_dynamic();
        self.run_page_pipeline(image, false)
    }

    // -- Shared chain -------------------------------------------------------

    /// Rotate → preprocess → re-encode → detect → normalize.
    fn run_page_pipeline(
        &self,
        image: DynamicImage,
        auto_rotation: bool,
    ) -> Result<Vec<TabularDataset>, TafelwerkError> {
        let correction = if auto_rotation {
            self.correction_for(&image)
        } else {
            RotationAngle::Deg0
        };

        let rotated = ImageProcessor::from_dynamic(image)
            .rotate_quarter(correction)
            .into_dynamic();

        let preprocessed = OcrPreprocessor::from_dynamic(rotated).run().into_dynamic();

        // The JPEG buffer only lives for the detection call.
        let raw_tables = {
            let jpeg = ImageProcessor::from_dynamic(preprocessed)
                .to_jpeg_bytes(self.config.jpeg_quality)?;
            debug!(jpeg_len = jpeg.len(), "Intermediate buffer encoded");
            self.engine.detect_tables(&jpeg, &self.config.detection)?
        };

        info!(tables = raw_tables.len(), "Table detection complete");
        Ok(raw_tables.iter().map(normalize).collect())
    }

    /// Correction angle for a page, honouring the auto-rotation wiring.
    ///
    /// Auto-rotation without a configured signal degrades to "no correction",
    /// matching the best-effort orientation policy.
    fn correction_for(&self, image: &DynamicImage) -> RotationAngle {
        if !self.config.auto_rotation {
            return RotationAngle::Deg0;
        }
        match &self.orientation {
            Some(detector) => detector.detect_correction(image),
            None => {
                warn!("Auto-rotation enabled but no orientation signal configured");
                RotationAngle::Deg0
            }
        }
    }
}
