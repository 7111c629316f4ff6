// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The adaptive enhancement pipeline: encoded bytes in, encoded binary image out.

use formscan_core::PipelineConfig;
use formscan_core::error::{FormscanError, Result};
use image::{DynamicImage, GrayImage};
use tracing::{debug, info, instrument};

use crate::codec;
use crate::scan::binarize::{self, ThresholdParams};
use crate::scan::closing;
use crate::scan::convolve::{ConvolutionKernel, convolve};
use crate::scan::grayscale;
use crate::scan::integral::IntegralImage;

/// Prepares photographed forms for text recognition.
///
/// Runs five stages strictly in order, each producing a fresh buffer:
///
/// 1. Luminance reduction of the RGB input
/// 2. Binomial smoothing, then Laplacian sharpening (pass-through borders)
/// 3. Integral image of the sharpened buffer
/// 4. Local-mean adaptive binarization (row-parallel)
/// 5. Closing (a copy unless configured otherwise)
///
/// The pipeline holds only its configuration and kernels; nothing carries
/// over between calls, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct EnhancementPipeline {
    config: PipelineConfig,
    smoothing: ConvolutionKernel,
    sharpening: ConvolutionKernel,
}

impl Default for EnhancementPipeline {
    fn default() -> Self {
        Self {
            config: PipelineConfig::default(),
            smoothing: ConvolutionKernel::smoothing(),
            sharpening: ConvolutionKernel::sharpening(),
        }
    }
}

impl EnhancementPipeline {
    // -- Construction ---------------------------------------------------------

    /// Create a pipeline with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`FormscanError::Config`] if `config` fails validation.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    // -- Entry points ---------------------------------------------------------

    /// Decode `data`, enhance it and re-encode the single-channel result.
    ///
    /// The output format follows [`PipelineConfig::output_format`]. Identical
    /// input always yields identical output.
    ///
    /// # Errors
    ///
    /// [`FormscanError::Decode`] for empty or unreadable input,
    /// [`FormscanError::Dimension`] for a zero-sized image, and
    /// [`FormscanError::Encode`] if the result cannot be written in the
    /// chosen format.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn preprocess(&self, data: &[u8]) -> Result<Vec<u8>> {
        let (image, input_format) = codec::decode(data)?;
        let enhanced = self.run(&image)?;

        let output_format = codec::resolve_output_format(self.config.output_format, input_format);
        let bytes = codec::encode_gray(&enhanced, output_format)?;
        info!(
            ?input_format,
            ?output_format,
            output_len = bytes.len(),
            "Scan preprocessing complete"
        );
        Ok(bytes)
    }

    /// Run every stage on an already-decoded image.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn run(&self, image: &DynamicImage) -> Result<GrayImage> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(FormscanError::Dimension { width, height });
        }
        info!(width, height, "Running scan enhancement pipeline");

        // Step 1: Luminance.
        let gray = grayscale::to_luminance(&image.to_rgb8())?;

        // Step 2: Denoise, then restore edges.
        let sharpened = self.filter(&gray);

        // Steps 3-5.
        let binary = self.threshold(&sharpened)?;
        let closed = closing::close(&binary, self.config.closing);

        debug!("Pipeline stages complete");
        Ok(closed)
    }

    // -- Stages ---------------------------------------------------------------

    /// Smoothing followed by sharpening.
    pub fn filter(&self, gray: &GrayImage) -> GrayImage {
        let smoothed = convolve(gray, &self.smoothing);
        convolve(&smoothed, &self.sharpening)
    }

    /// Integral image plus adaptive binarization of a filtered buffer.
    pub fn threshold(&self, sharpened: &GrayImage) -> Result<GrayImage> {
        let integral = IntegralImage::build(sharpened);
        binarize::binarize(sharpened, &integral, &ThresholdParams::from(&self.config))
    }
}

/// Enhance encoded image bytes with the default configuration.
///
/// Shorthand for `EnhancementPipeline::default().preprocess(data)`.
pub fn preprocess(data: &[u8]) -> Result<Vec<u8>> {
    EnhancementPipeline::default().preprocess(data)
}
