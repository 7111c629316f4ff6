// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared enums for the enhancement pipeline.

use serde::{Deserialize, Serialize};

/// Intensity written for foreground (text) pixels in binary output.
pub const FOREGROUND: u8 = 0;

/// Intensity written for background pixels in binary output.
pub const BACKGROUND: u8 = 255;

/// Behaviour of the final closing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum ClosingMode {
    /// Copy the binarized buffer through unchanged.
    #[default]
    Passthrough,
    /// Morphological closing of the dark strokes with a square structuring
    /// element of the given radius.
    Morphological { radius: u8 },
}

/// Encoded format of the pipeline's output bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Re-encode in the input's format when it stores 8-bit grayscale
    /// losslessly (PNG, BMP, TIFF, PNM), otherwise PNG.
    #[default]
    SameAsInput,
    Png,
    Jpeg,
    Bmp,
    Tiff,
}
