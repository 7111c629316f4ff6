// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Summed-area table over a grayscale buffer.

use image::GrayImage;
use tracing::instrument;

/// Summed-area table of a grayscale image.
///
/// Stored as `(height + 1) x (width + 1)` cells in row-major order. Row 0
/// and column 0 are zero, and cell `(x, y)` holds the sum of every pixel
/// `(i, j)` with `i < x` and `j < y`.
#[derive(Debug, Clone)]
pub struct IntegralImage {
    width: u32,
    height: u32,
    table: Vec<u64>,
}

impl IntegralImage {
    /// Build the table in one forward row-major sweep.
    #[instrument(skip(image), fields(width = image.width(), height = image.height()))]
    pub fn build(image: &GrayImage) -> Self {
        let (width, height) = image.dimensions();
        let stride = width as usize + 1;
        let mut table = vec![0u64; stride * (height as usize + 1)];
        let pixels = image.as_raw();

        for y in 1..=height as usize {
            for x in 1..=width as usize {
                let pixel = pixels[(y - 1) * (stride - 1) + (x - 1)] as u64;
                let left = table[y * stride + x - 1];
                let up = table[(y - 1) * stride + x];
                let up_left = table[(y - 1) * stride + x - 1];
                // `up >= up_left`, so the subtraction cannot underflow.
                table[y * stride + x] = pixel + left + up - up_left;
            }
        }

        Self {
            width,
            height,
            table,
        }
    }

    /// Width of the source image.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the source image.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cumulative sum at table coordinates `(x, y)`, `x <= width`, `y <= height`.
    pub fn get(&self, x: u32, y: u32) -> u64 {
        self.table[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// Sum of the pixels in the half-open rectangle `[x0, x1) x [y0, y1)`.
    ///
    /// Requires `x0 <= x1 <= width` and `y0 <= y1 <= height`.
    pub fn rect_sum(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> u64 {
        debug_assert!(x0 <= x1 && x1 <= self.width);
        debug_assert!(y0 <= y1 && y1 <= self.height);
        // Add before subtracting so the intermediate never goes negative.
        (self.get(x1, y1) + self.get(x0, y0)) - self.get(x0, y1) - self.get(x1, y0)
    }
}
