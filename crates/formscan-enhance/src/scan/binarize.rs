// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Adaptive (local-mean) binarization backed by an integral image.
//
// Each pixel is compared against the mean of a square window centred on it,
// so a shadow falling across half the page shifts the threshold with it.
// The integral image makes each window mean O(1) regardless of window size.

use formscan_core::error::{FormscanError, Result};
use formscan_core::{BACKGROUND, FOREGROUND, PipelineConfig};
use image::GrayImage;
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::scan::integral::IntegralImage;

/// Parameters of the local-mean threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdParams {
    /// The window side is `max(width, height) / window_divisor`...
    pub window_divisor: u32,
    /// ...but never less than this.
    pub min_window: u32,
    /// Subtracted from the local mean.
    pub bias: i32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

impl From<&PipelineConfig> for ThresholdParams {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            window_divisor: config.window_divisor,
            min_window: config.min_window,
            bias: config.bias,
        }
    }
}

/// Side of the square window used for the local mean.
pub fn window_size(width: u32, height: u32, params: &ThresholdParams) -> u32 {
    (width.max(height) / params.window_divisor.max(1)).max(params.min_window)
}

/// Classify every pixel of `image` as foreground (0) or background (255).
///
/// A pixel is foreground when its intensity is strictly below the mean of its
/// border-clipped window minus `params.bias`. Rows are processed in parallel;
/// each worker writes only its own row of the output and reads the shared
/// `image` and `integral`.
///
/// # Errors
///
/// Returns [`FormscanError::Processing`] if `integral` was not built from an
/// image of the same dimensions.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn binarize(
    image: &GrayImage,
    integral: &IntegralImage,
    params: &ThresholdParams,
) -> Result<GrayImage> {
    let (width, height) = image.dimensions();
    if (integral.width(), integral.height()) != (width, height) {
        return Err(FormscanError::Processing(format!(
            "integral image is {}x{} but the image is {}x{}",
            integral.width(),
            integral.height(),
            width,
            height
        )));
    }
    if width == 0 || height == 0 {
        return Err(FormscanError::Dimension { width, height });
    }

    let window = window_size(width, height, params);
    let half = window / 2;
    info!(window, bias = params.bias, "Applying adaptive binarization");

    let mut output = vec![0u8; width as usize * height as usize];
    output
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            let y0 = y.saturating_sub(half);
            let y1 = (y + half).min(height - 1) + 1;
            for (x, out) in row.iter_mut().enumerate() {
                let x = x as u32;
                let x0 = x.saturating_sub(half);
                let x1 = (x + half).min(width - 1) + 1;

                let sum = integral.rect_sum(x0, y0, x1, y1);
                let count = ((x1 - x0) * (y1 - y0)) as u64;
                let threshold = (sum / count) as i64 - params.bias as i64;

                let pixel = image.get_pixel(x, y).0[0] as i64;
                *out = if pixel < threshold { FOREGROUND } else { BACKGROUND };
            }
        });

    debug!("Binarization complete");
    GrayImage::from_raw(width, height, output).ok_or_else(|| {
        FormscanError::Processing("binarized buffer has the wrong length".into())
    })
}

/// Single global cut-off: pixels brighter than `threshold` become background.
pub fn global_threshold(image: &GrayImage, threshold: u8) -> GrayImage {
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold {
            BACKGROUND
        } else {
            FOREGROUND
        };
    }
    output
}
