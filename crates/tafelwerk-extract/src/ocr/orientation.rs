// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page orientation detection — queries an external OCR orientation signal
// and maps the detected skew to a corrective rotation. Orientation
// correction is an enhancement, not a required step: every failure path
// degrades to "no correction" rather than propagating.

use image::DynamicImage;
use tafelwerk_core::RotationAngle;
use tafelwerk_core::error::TafelwerkError;
use tracing::{debug, instrument, warn};

/// Capability interface for the external OCR orientation signal.
///
/// Implementations report how far the page content is rotated *clockwise
/// from upright*, as one of 0/90/180/270. Any other value, or an error,
/// is treated by the detector as "no confident signal".
pub trait OrientationSignal {
    /// Detected clockwise rotation of the page content, in degrees.
    fn detect_rotation(&self, image: &DynamicImage) -> Result<u32, TafelwerkError>;
}

/// Maps the raw orientation signal to a usable correction angle.
///
/// Callers always receive an angle: signal failures are logged and mapped
/// to [`RotationAngle::Deg0`].
pub struct OrientationDetector {
    signal: Box<dyn OrientationSignal>,
}

impl OrientationDetector {
    pub fn new(signal: Box<dyn OrientationSignal>) -> Self {
        Self { signal }
    }

    /// Ask the signal for a skew estimate and return the corrective rotation.
    ///
    /// Never fails: an engine error or an unparseable angle yields
    /// [`RotationAngle::Deg0`] with a warning.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn detect_correction(&self, image: &DynamicImage) -> RotationAngle {
        match self.signal.detect_rotation(image) {
            Ok(detected) => {
                let correction = RotationAngle::from_detected(detected);
                if correction.is_upright() && detected != 0 {
                    warn!(detected, "No confident orientation signal; skipping correction");
                } else {
                    debug!(detected, correction = %correction, "Orientation detected");
                }
                correction
            }
            Err(err) => {
                warn!(%err, "Orientation detection failed; skipping correction");
                RotationAngle::Deg0
            }
        }
    }
}
