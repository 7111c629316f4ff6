// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Luminance reduction from three interleaved colour channels to one.

use formscan_core::error::{FormscanError, Result};
use image::{GrayImage, Luma, RgbImage};
use tracing::{debug, instrument};

/// Collapse an RGB buffer to luminance: `0.299 R + 0.587 G + 0.114 B`,
/// truncated to 8 bits.
///
/// Uses integer weights in thousandths so grey input (R = G = B) comes back
/// unchanged instead of drifting by one through float rounding.
#[instrument(skip(rgb), fields(width = rgb.width(), height = rgb.height()))]
pub fn to_luminance(rgb: &RgbImage) -> Result<GrayImage> {
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(FormscanError::Dimension { width, height });
    }

    let gray = GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        Luma([luma as u8])
    });

    debug!("Grayscale conversion complete");
    Ok(gray)
}
