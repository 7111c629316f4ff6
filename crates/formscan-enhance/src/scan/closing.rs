// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Final clean-up stage after binarization.

use formscan_core::ClosingMode;
use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology;
use tracing::{debug, instrument};

/// Apply the closing stage to a binarized buffer.
///
/// [`ClosingMode::Passthrough`] returns an exact copy. Broken strokes are
/// left as they are.
///
/// [`ClosingMode::Morphological`] closes the dark strokes (dilate black, then
/// erode black) with a square structuring element of the given radius.
/// `imageproc` treats non-zero pixels as foreground, so closing black text on
/// white paper is an *opening* of the white background.
#[instrument(skip(binary), fields(width = binary.width(), height = binary.height()))]
pub fn close(binary: &GrayImage, mode: ClosingMode) -> GrayImage {
    match mode {
        ClosingMode::Passthrough => binary.clone(),
        ClosingMode::Morphological { radius: 0 } => binary.clone(),
        ClosingMode::Morphological { radius } => {
            debug!(radius, "Closing strokes");
            morphology::open(binary, Norm::LInf, radius)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formscan_core::{BACKGROUND, FOREGROUND};
    use image::Luma;

    /// A three-pixel-thick black bar with a one-pixel white break at x = 10.
    fn broken_bar() -> GrayImage {
        GrayImage::from_fn(21, 21, |x, y| {
            if (9..12).contains(&y) && x >= 3 && x <= 17 && x != 10 {
                Luma([FOREGROUND])
            } else {
                Luma([BACKGROUND])
            }
        })
    }

    #[test]
    fn passthrough_is_byte_identical() {
        let binary = broken_bar();
        let closed = close(&binary, ClosingMode::Passthrough);
        assert_eq!(closed.as_raw(), binary.as_raw());
    }

    #[test]
    fn zero_radius_is_a_copy() {
        let binary = broken_bar();
        assert_eq!(close(&binary, ClosingMode::Morphological { radius: 0 }), binary);
    }

    #[test]
    fn morphological_closing_bridges_a_gap() {
        let binary = broken_bar();
        let closed = close(&binary, ClosingMode::Morphological { radius: 1 });
        assert_eq!(closed.get_pixel(10, 10).0[0], FOREGROUND);
        // Paper away from the bar stays white.
        assert_eq!(closed.get_pixel(10, 2).0[0], BACKGROUND);
        assert_eq!(closed.get_pixel(0, 20).0[0], BACKGROUND);
    }
}
