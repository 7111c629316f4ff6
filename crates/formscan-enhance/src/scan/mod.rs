// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan enhancement - grayscale reduction, convolution filters, integral-image
// adaptive binarization, closing, the pipeline tying them together, and
// optical character recognition (OCR).

pub mod binarize;
pub mod closing;
pub mod convolve;
pub mod grayscale;
pub mod integral;
pub mod pipeline;

#[cfg(feature = "ocr")]
pub mod ocr;

pub use convolve::ConvolutionKernel;
pub use integral::IntegralImage;
pub use pipeline::EnhancementPipeline;

#[cfg(feature = "ocr")]
pub use ocr::OcrEngine;
