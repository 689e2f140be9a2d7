// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR module — the page orientation signal and its best-effort correction
// mapping.

pub mod orientation;

pub use orientation::{OrientationDetector, OrientationSignal};
