// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Named preprocessing strategies and the registry that looks them up.

use std::collections::BTreeMap;

use formscan_core::{OutputFormat, ScanConfig};
use formscan_core::error::{FormscanError, Result};
use tracing::{info, instrument, warn};

use crate::codec;
use crate::scan::binarize;
use crate::scan::grayscale;
use crate::scan::pipeline::EnhancementPipeline;

/// A way of turning a raw photo into an image a text recogniser can read.
pub trait Preprocessor: Send + Sync {
    /// Registry key, e.g. `"enhanced"`.
    fn name(&self) -> &'static str;

    /// Encoded image bytes in, encoded single-channel image bytes out.
    fn preprocess(&self, data: &[u8]) -> Result<Vec<u8>>;
}

impl Preprocessor for EnhancementPipeline {
    fn name(&self) -> &'static str {
        "enhanced"
    }

    fn preprocess(&self, data: &[u8]) -> Result<Vec<u8>> {
        EnhancementPipeline::preprocess(self, data)
    }
}

/// Luminance plus one fixed cut-off for the whole page. Fast, but a shadow
/// across the form swallows whatever text it covers.
#[derive(Debug, Clone, Copy)]
pub struct GlobalThreshold {
    threshold: u8,
    output_format: OutputFormat,
}

impl GlobalThreshold {
    pub const fn new(threshold: u8, output_format: OutputFormat) -> Self {
        Self {
            threshold,
            output_format,
        }
    }
}

impl Default for GlobalThreshold {
    fn default() -> Self {
        Self::new(127, OutputFormat::SameAsInput)
    }
}

impl Preprocessor for GlobalThreshold {
    fn name(&self) -> &'static str {
        "basic"
    }

    #[instrument(skip(self, data), fields(threshold = self.threshold, data_len = data.len()))]
    fn preprocess(&self, data: &[u8]) -> Result<Vec<u8>> {
        let (image, input_format) = codec::decode(data)?;
        let gray = grayscale::to_luminance(&image.to_rgb8())?;
        let binary = binarize::global_threshold(&gray, self.threshold);
        let format = codec::resolve_output_format(self.output_format, input_format);
        codec::encode_gray(&binary, format)
    }
}

/// Lookup table from preprocessor name to implementation.
///
/// Built once at start-up; lookups of unknown names fall back to the
/// configured default instead of failing.
pub struct PreprocessorRegistry {
    preprocessors: BTreeMap<&'static str, Box<dyn Preprocessor>>,
    default_name: String,
}

impl PreprocessorRegistry {
    /// Registry holding the built-in `enhanced` and `basic` preprocessors.
    ///
    /// # Errors
    ///
    /// Returns [`FormscanError::Config`] if the configuration is invalid or
    /// names a default preprocessor that is not registered.
    pub fn with_defaults(config: &ScanConfig) -> Result<Self> {
        config.validate()?;
        let mut registry = Self {
            preprocessors: BTreeMap::new(),
            default_name: config.default_preprocessor.clone(),
        };
        registry.register(Box::new(EnhancementPipeline::new(config.pipeline.clone())?));
        registry.register(Box::new(GlobalThreshold::new(
            config.global_threshold,
            config.pipeline.output_format,
        )));

        if !registry.preprocessors.contains_key(registry.default_name.as_str()) {
            return Err(FormscanError::Config(format!(
                "default preprocessor '{}' is not registered (available: {})",
                registry.default_name,
                registry.available().join(", ")
            )));
        }

        info!(
            count = registry.preprocessors.len(),
            available = %registry.available().join(", "),
            "Loaded preprocessors"
        );
        Ok(registry)
    }

    /// Add or replace a preprocessor under its own name.
    pub fn register(&mut self, preprocessor: Box<dyn Preprocessor>) {
        self.preprocessors.insert(preprocessor.name(), preprocessor);
    }

    /// Look up a preprocessor, falling back to the default for unknown names.
    pub fn get(&self, name: &str) -> &dyn Preprocessor {
        if let Some(found) = self.preprocessors.get(name) {
            return found.as_ref();
        }
        warn!(
            requested = name,
            fallback = %self.default_name,
            "Unknown preprocessor; using default"
        );
        self.default_preprocessor()
    }

    /// The configured default preprocessor.
    pub fn default_preprocessor(&self) -> &dyn Preprocessor {
        self.preprocessors
            .get(self.default_name.as_str())
            .map(|p| p.as_ref())
            .unwrap_or(&FALLBACK)
    }

    /// Registered names in sorted order.
    pub fn available(&self) -> Vec<&'static str> {
        self.preprocessors.keys().copied().collect()
    }
}

// `with_defaults` guarantees the default is registered and entries are never
// removed, so this is never handed out in practice.
static FALLBACK: GlobalThreshold = GlobalThreshold::new(127, OutputFormat::SameAsInput);

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageFormat, Luma};

    struct Echo;

    impl Preprocessor for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn preprocess(&self, data: &[u8]) -> Result<Vec<u8>> {
            Ok(data.to_vec())
        }
    }

    fn gradient(format: ImageFormat) -> Vec<u8> {
        let image = GrayImage::from_fn(32, 32, |x, _| Luma([(x * 8) as u8]));
        let mut buffer = Vec::new();
        DynamicImage::ImageLuma8(image)
            .write_to(&mut std::io::Cursor::new(&mut buffer), format)
            .unwrap();
        buffer
    }

    #[test]
    fn defaults_are_registered_and_sorted() {
        let registry = PreprocessorRegistry::with_defaults(&ScanConfig::default()).unwrap();
        assert_eq!(registry.available(), vec!["basic", "enhanced"]);
        assert_eq!(registry.get("basic").name(), "basic");
        assert_eq!(registry.default_preprocessor().name(), "enhanced");
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        let config = ScanConfig {
            default_preprocessor: "basic".into(),
            ..ScanConfig::default()
        };
        let registry = PreprocessorRegistry::with_defaults(&config).unwrap();
        assert_eq!(registry.get("cloud_ocr").name(), "basic");
    }

    #[test]
    fn unregistered_default_is_a_config_error() {
        let config = ScanConfig {
            default_preprocessor: "missing".into(),
            ..ScanConfig::default()
        };
        assert!(matches!(
            PreprocessorRegistry::with_defaults(&config),
            Err(FormscanError::Config(_))
        ));
    }

    #[test]
    fn custom_preprocessors_can_be_registered() {
        let mut registry = PreprocessorRegistry::with_defaults(&ScanConfig::default()).unwrap();
        registry.register(Box::new(Echo));
        assert_eq!(registry.available(), vec!["basic", "echo", "enhanced"]);
        assert_eq!(registry.get("echo").preprocess(b"abc").unwrap(), b"abc");
    }

    #[test]
    fn basic_splits_at_the_global_threshold() {
        let output = GlobalThreshold::default().preprocess(&gradient(ImageFormat::Png)).unwrap();
        let decoded = image::load_from_memory(&output).unwrap().to_luma8();
        // x * 8: column 15 is 120 (dark), column 16 is 128 (light).
        assert_eq!(decoded.get_pixel(15, 0).0[0], 0);
        assert_eq!(decoded.get_pixel(16, 0).0[0], 255);
    }

    #[test]
    fn basic_honours_configured_output_format() {
        let mut config = ScanConfig::default();
        config.pipeline.output_format = OutputFormat::Png;
        let registry = PreprocessorRegistry::with_defaults(&config).unwrap();

        let output = registry
            .get("basic")
            .preprocess(&gradient(ImageFormat::Bmp))
            .unwrap();
        assert_eq!(image::guess_format(&output).unwrap(), ImageFormat::Png);

        let kept = GlobalThreshold::default()
            .preprocess(&gradient(ImageFormat::Bmp))
            .unwrap();
        assert_eq!(image::guess_format(&kept).unwrap(), ImageFormat::Bmp);
    }

    #[test]
    fn basic_rejects_garbage() {
        assert!(matches!(
            GlobalThreshold::default().preprocess(b"nope"),
            Err(FormscanError::Decode(_))
        ));
    }
}
