// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Table module — the external detection-engine contract and normalization of
// raw table structures into header-promoted datasets.

pub mod engine;
pub mod normalize;

pub use engine::TableEngine;
pub use normalize::normalize;
