// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decoding with configurable safety limits, rotation,
// grayscale and contrast adjustment, and intermediate-format encoding.
// Operates on in-memory images using the `image` and `imageproc` crates.

use image::{DynamicImage, ImageFormat, ImageReader, Limits, RgbaImage};
use imageproc::geometric_transformations::{self, Interpolation};
use tafelwerk_core::RotationAngle;
use tafelwerk_core::error::TafelwerkError;
use tracing::{debug, info, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// All operations are non-destructive: each method consumes `self` and returns a
/// new `ImageProcessor` wrapping the transformed image, enabling method chaining.
///
/// ```ignore
/// let jpeg = ImageProcessor::from_bytes(&data, true)?
///     .to_rgb()
///     .rotate_quarter(RotationAngle::Deg270)
///     .to_jpeg_bytes(90)?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    ///
    /// `allow_large` disables the decoder's pixel-count safety limits; scanned
    /// pages routinely exceed them.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), allow_large))]
    pub fn open(
        path: impl AsRef<std::path::Path>,
        allow_large: bool,
    ) -> Result<Self, TafelwerkError> {
        let data = std::fs::read(path.as_ref())?;
        let processor = Self::from_bytes(&data, allow_large).map_err(|err| {
            TafelwerkError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(
            width = processor.width(),
            height = processor.height(),
            "Image loaded"
        );
        Ok(processor)
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, TIFF, etc.).
    #[instrument(skip(data), fields(data_len = data.len(), allow_large))]
    pub fn from_bytes(data: &[u8], allow_large: bool) -> Result<Self, TafelwerkError> {
        let mut reader = ImageReader::new(std::io::Cursor::new(data))
            .with_guessed_format()
            .map_err(|err| {
                TafelwerkError::ImageError(format!("failed to probe image format: {}", err))
            })?;

        let limits = if allow_large {
            Limits::no_limits()
        } else {
            Limits::default()
        };
        reader.limits(limits);

        let img = reader.decode().map_err(|err| {
            TafelwerkError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Convert the image to 8-bit RGB, the working colour mode of the pipeline.
    pub fn to_rgb(self) -> Self {
        Self {
            image: DynamicImage::ImageRgb8(self.image.to_rgb8()),
        }
    }

    /// Rotate by a quarter-turn correction angle (clockwise).
    ///
    /// Quarter turns are lossless and the canvas expands to the rotated
    /// bounds, so no content is ever clipped.
    #[instrument(skip(self), fields(angle = %angle))]
    pub fn rotate_quarter(self, angle: RotationAngle) -> Self {
        if !angle.is_upright() {
            info!(degrees = angle.degrees(), "Rotating image");
        }
        let image = match angle {
            RotationAngle::Deg0 => self.image,
            RotationAngle::Deg90 => self.image.rotate90(),
            RotationAngle::Deg180 => self.image.rotate180(),
            RotationAngle::Deg270 => self.image.rotate270(),
        };
        Self { image }
    }

    /// Rotate the image by an arbitrary angle in degrees (clockwise).
    ///
    /// Exact multiples of 90 take the lossless quarter-turn path. Other
    /// angles (fractional deskew) use an affine transformation with bilinear
    /// interpolation about the image centre, filling revealed corners with
    /// white.
    #[instrument(skip(self), fields(degrees))]
    pub fn rotate(self, degrees: f32) -> Self {
        // Fast-path for exact multiples of 90.
        let normalised = degrees.rem_euclid(360.0);
        if (normalised - 90.0).abs() < 0.01 {
            return self.rotate_quarter(RotationAngle::Deg90);
        }
        if (normalised - 180.0).abs() < 0.01 {
            return self.rotate_quarter(RotationAngle::Deg180);
        }
        if (normalised - 270.0).abs() < 0.01 {
            return self.rotate_quarter(RotationAngle::Deg270);
        }
        if normalised.abs() < 0.01 || (normalised - 360.0).abs() < 0.01 {
            return self;
        }

        info!(degrees, "Applying general rotation");
        let rgba = self.image.to_rgba8();
        let radians = degrees.to_radians();
        let default_pixel = image::Rgba([255u8, 255, 255, 255]);

        let rotated: RgbaImage = geometric_transformations::rotate_about_center(
            &rgba,
            radians,
            Interpolation::Bilinear,
            default_pixel,
        );

        debug!("General rotation applied");
        Self {
            image: DynamicImage::ImageRgba8(rotated),
        }
    }

    /// Convert the image to grayscale (luma).
    pub fn grayscale(self) -> Self {
        Self {
            image: DynamicImage::ImageLuma8(self.image.to_luma8()),
        }
    }

    /// Adjust contrast by a factor anchored at the intensity midpoint.
    /// Values > 1.0 increase contrast; 1.0 is a no-op.
    #[instrument(skip(self), fields(factor))]
    pub fn adjust_contrast(self, factor: f32) -> Self {
        let gray = self.image.to_luma8();
        let contrasted = image::ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
            let value = gray.get_pixel(x, y).0[0];
            let adjusted = factor * (value as f32 - 128.0) + 128.0;
            image::Luma([adjusted.clamp(0.0, 255.0) as u8])
        });
        Self {
            image: DynamicImage::ImageLuma8(contrasted),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, TafelwerkError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| {
                TafelwerkError::ImageError(format!("PNG encoding failed: {}", err))
            })?;
        Ok(buffer)
    }

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    ///
    /// This is the stable intermediate format the table-detection engine
    /// ingests.
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, TafelwerkError> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder).map_err(|err| {
            TafelwerkError::ImageError(format!("JPEG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = GrayImage::from_fn(width, height, |x, y| Luma([((x + y) % 256) as u8]));
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let processor = ImageProcessor::from_dynamic(gradient(40, 30));
        let rotated = processor.rotate_quarter(RotationAngle::Deg90);
        assert_eq!(rotated.width(), 30);
        assert_eq!(rotated.height(), 40);
    }

    #[test]
    fn upright_rotation_is_identity() {
        let original = gradient(17, 23);
        let rotated = ImageProcessor::from_dynamic(original.clone())
            .rotate_quarter(RotationAngle::Deg0)
            .into_dynamic();
        assert_eq!(rotated.to_luma8(), original.to_luma8());
    }

    #[test]
    fn half_turn_preserves_dimensions() {
        let rotated = ImageProcessor::from_dynamic(gradient(40, 30))
            .rotate_quarter(RotationAngle::Deg180);
        assert_eq!(rotated.width(), 40);
        assert_eq!(rotated.height(), 30);
    }

    #[test]
    fn general_rotate_takes_quarter_fast_path() {
        let rotated = ImageProcessor::from_dynamic(gradient(40, 30)).rotate(270.0);
        assert_eq!(rotated.width(), 30);
        assert_eq!(rotated.height(), 40);
    }

    #[test]
    fn contrast_factor_one_is_noop_on_gray() {
        let original = gradient(16, 16);
        let adjusted = ImageProcessor::from_dynamic(original.clone())
            .adjust_contrast(1.0)
            .into_dynamic();
        assert_eq!(adjusted.to_luma8(), original.to_luma8());
    }

    #[test]
    fn contrast_pushes_extremes_outward() {
        let img = GrayImage::from_pixel(4, 4, Luma([200u8]));
        let adjusted = ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(img))
            .adjust_contrast(2.0)
            .into_dynamic();
        // 2 * (200 - 128) + 128 = 272, clamped to 255.
        assert_eq!(adjusted.to_luma8().get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn jpeg_round_trip_decodes() {
        let jpeg = ImageProcessor::from_dynamic(gradient(32, 32))
            .to_jpeg_bytes(90)
            .expect("encode");
        let decoded = ImageProcessor::from_bytes(&jpeg, false).expect("decode");
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 32);
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        let result = ImageProcessor::from_bytes(b"not an image at all", true);
        assert!(matches!(result, Err(TafelwerkError::ImageError(_))));
    }

    #[test]
    fn open_reads_image_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("page.png");
        let png = ImageProcessor::from_dynamic(gradient(24, 18))
            .to_png_bytes()
            .expect("encode");
        std::fs::write(&path, png).expect("write");

        let processor = ImageProcessor::open(&path, false).expect("open");
        assert_eq!((processor.width(), processor.height()), (24, 18));
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let result = ImageProcessor::open("/nonexistent/page.png", true);
        assert!(matches!(result, Err(TafelwerkError::Io(_))));
    }

    #[test]
    fn to_rgb_converts_colour_mode() {
        let rgb = ImageProcessor::from_dynamic(gradient(8, 8)).to_rgb();
        assert!(matches!(rgb.as_dynamic(), DynamicImage::ImageRgb8(_)));
    }
}
