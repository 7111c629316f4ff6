// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Square-kernel convolution with a pass-through border.

use formscan_core::error::{FormscanError, Result};
use image::GrayImage;
use tracing::{debug, instrument};

/// An odd-sized square matrix of integer weights and the divisor applied to
/// the weighted sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvolutionKernel {
    size: usize,
    weights: Vec<i32>,
    divisor: i32,
}

impl ConvolutionKernel {
    /// Build a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FormscanError::Processing`] if `size` is even or zero, the
    /// weight count is not `size * size`, or `divisor` is zero.
    pub fn new(size: usize, weights: Vec<i32>, divisor: i32) -> Result<Self> {
        if size % 2 == 0 {
            return Err(FormscanError::Processing(format!(
                "kernel size must be odd, got {}",
                size
            )));
        }
        if weights.len() != size * size {
            return Err(FormscanError::Processing(format!(
                "kernel of size {} needs {} weights, got {}",
                size,
                size * size,
                weights.len()
            )));
        }
        if divisor == 0 {
            return Err(FormscanError::Processing("kernel divisor must be non-zero".into()));
        }
        Ok(Self {
            size,
            weights,
            divisor,
        })
    }

    /// 3x3 binomial blur (1 2 1 / 2 4 2 / 1 2 1, divided by 16).
    pub fn smoothing() -> Self {
        Self {
            size: 3,
            weights: vec![1, 2, 1, 2, 4, 2, 1, 2, 1],
            divisor: 16,
        }
    }

    /// 3x3 Laplacian sharpen (0 -1 0 / -1 5 -1 / 0 -1 0), unnormalized.
    pub fn sharpening() -> Self {
        Self {
            size: 3,
            weights: vec![0, -1, 0, -1, 5, -1, 0, -1, 0],
            divisor: 1,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the centre to the kernel edge.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    pub fn divisor(&self) -> i32 {
        self.divisor
    }
}

/// Convolve a grayscale buffer with `kernel`.
///
/// Interior pixels receive the weighted neighbourhood sum divided by the
/// kernel divisor (floored, clamped to 0..=255). Pixels closer than the
/// kernel radius to any edge are copied from the input unchanged; there is
/// no padding and no clamped read. A buffer too small to have an interior is
/// returned as a copy.
#[instrument(skip(image, kernel), fields(width = image.width(), height = image.height(), kernel_size = kernel.size()))]
pub fn convolve(image: &GrayImage, kernel: &ConvolutionKernel) -> GrayImage {
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);
    let (size, r, divisor) = (kernel.size(), kernel.radius(), kernel.divisor());
    let src = image.as_raw();

    let mut output = image.clone();
    if w <= 2 * r || h <= 2 * r {
        debug!("Image smaller than kernel; passing through unchanged");
        return output;
    }

    let dst: &mut [u8] = &mut output;
    for y in r..h - r {
        for x in r..w - r {
            let mut acc: i32 = 0;
            for ky in 0..size {
                let row = (y + ky - r) * w;
                let weights = &kernel.weights[ky * size..(ky + 1) * size];
                for (kx, &weight) in weights.iter().enumerate() {
                    acc += weight * src[row + x + kx - r] as i32;
                }
            }
            dst[y * w + x] = acc.div_euclid(divisor).clamp(0, 255) as u8;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Deterministic pseudo-random texture.
    fn noisy(width: u32, height: u32) -> GrayImage {
        let mut state: u32 = 0x2545_f491;
        GrayImage::from_fn(width, height, |_, _| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            Luma([(state >> 24) as u8])
        })
    }

    fn assert_border_unchanged(before: &GrayImage, after: &GrayImage, radius: u32) {
        let (w, h) = before.dimensions();
        for (x, y, pixel) in before.enumerate_pixels() {
            let on_border = x < radius || y < radius || x >= w - radius || y >= h - radius;
            if on_border {
                assert_eq!(after.get_pixel(x, y), pixel, "border pixel ({x}, {y}) changed");
            }
        }
    }

    #[test]
    fn border_is_untouched_by_both_kernels() {
        let image = noisy(23, 17);
        for kernel in [ConvolutionKernel::smoothing(), ConvolutionKernel::sharpening()] {
            let out = convolve(&image, &kernel);
            assert_border_unchanged(&image, &out, kernel.radius() as u32);
        }
    }

    #[test]
    fn uniform_interior_is_a_fixed_point() {
        let image = GrayImage::from_pixel(10, 10, Luma([137]));
        assert_eq!(convolve(&image, &ConvolutionKernel::smoothing()), image);
        assert_eq!(convolve(&image, &ConvolutionKernel::sharpening()), image);
    }

    #[test]
    fn smoothing_spreads_a_single_bright_pixel() {
        let mut image = GrayImage::new(5, 5);
        image.put_pixel(2, 2, Luma([160]));
        let out = convolve(&image, &ConvolutionKernel::smoothing());
        assert_eq!(out.get_pixel(2, 2).0[0], 40); // 160 * 4 / 16
        assert_eq!(out.get_pixel(1, 2).0[0], 20); // 160 * 2 / 16
        assert_eq!(out.get_pixel(1, 1).0[0], 10); // 160 * 1 / 16
    }

    #[test]
    fn sharpening_clamps_to_byte_range() {
        let mut image = GrayImage::from_pixel(5, 5, Luma([100]));
        image.put_pixel(2, 2, Luma([200]));
        let out = convolve(&image, &ConvolutionKernel::sharpening());
        // Centre: 5 * 200 - 4 * 100 = 600 -> 255.
        assert_eq!(out.get_pixel(2, 2).0[0], 255);
        // Neighbour: 5 * 100 - 200 - 3 * 100 = 0.
        assert_eq!(out.get_pixel(1, 2).0[0], 0);
    }

    #[test]
    fn image_smaller_than_kernel_is_copied() {
        let image = noisy(2, 9);
        assert_eq!(convolve(&image, &ConvolutionKernel::smoothing()), image);
    }

    #[test]
    fn invalid_kernels_are_rejected() {
        assert!(ConvolutionKernel::new(2, vec![1; 4], 1).is_err());
        assert!(ConvolutionKernel::new(3, vec![1; 8], 1).is_err());
        assert!(ConvolutionKernel::new(3, vec![1; 9], 0).is_err());
        let box5 = ConvolutionKernel::new(5, vec![1; 25], 25).unwrap();
        assert_eq!((box5.size(), box5.radius(), box5.divisor()), (5, 2, 25));
    }

    #[test]
    fn box_kernel_divides_by_its_divisor() {
        let image = GrayImage::from_pixel(9, 9, Luma([100]));
        let box5 = ConvolutionKernel::new(5, vec![1; 25], 25).unwrap();
        let halved = ConvolutionKernel::new(5, vec![1; 25], 50).unwrap();
        assert_eq!(convolve(&image, &box5).get_pixel(4, 4).0[0], 100);
        assert_eq!(convolve(&image, &halved).get_pixel(4, 4).0[0], 50);
        assert_eq!(convolve(&image, &halved).get_pixel(1, 4).0[0], 100);
    }

    #[test]
    fn larger_kernel_widens_the_border() {
        let image = noisy(12, 12);
        let box5 = ConvolutionKernel::new(5, vec![1; 25], 25).unwrap();
        let out = convolve(&image, &box5);
        assert_border_unchanged(&image, &out, 2);
    }
}
