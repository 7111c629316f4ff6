// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// formscan-enhance - Image enhancement for scanned paper forms.
//
// Provides the adaptive enhancement pipeline (grayscale, smoothing, sharpening,
// integral-image adaptive binarization, closing), byte-level decode/encode
// helpers, a registry of named preprocessors, and an optional OCR hand-off.

pub mod codec;
pub mod registry;
pub mod scan;

// Re-export the primary entry points so callers can use `formscan_enhance::preprocess` etc.
pub use registry::{GlobalThreshold, Preprocessor, PreprocessorRegistry};
pub use scan::pipeline::{EnhancementPipeline, preprocess};

#[cfg(feature = "ocr")]
pub use scan::ocr::OcrEngine;
