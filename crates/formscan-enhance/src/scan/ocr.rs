// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hand-off from the enhancement pipeline to a text recogniser.
//
// Wraps the `ocrs` crate, a pure-Rust OCR engine whose neural network models
// run on `rten`. Only available with the `ocr` feature:
//
// ```toml
// formscan-enhance = { path = "crates/formscan-enhance", features = ["ocr"] }
// ```
//
// The engine needs `text-detection.rten` and `text-recognition.rten`. Running
// `ocrs-cli` once downloads both into `$XDG_CACHE_HOME/ocrs` (typically
// `~/.cache/ocrs`), which is where `OcrConfig::default()` looks.

use std::path::{Path, PathBuf};

use formscan_core::error::{FormscanError, Result};
use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

use crate::codec;

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// `$XDG_CACHE_HOME/ocrs`, else `~/.cache/ocrs`, else `./ocrs-models`.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// Where the OCR models live.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub detection_model_path: PathBuf,
    pub recognition_model_path: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self::from_dir(default_model_dir())
    }
}

impl OcrConfig {
    /// Expect both model files inside `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Fail early with a pointer to the download instructions if a model is missing.
    pub fn validate(&self) -> Result<()> {
        for (kind, path) in [
            ("detection", &self.detection_model_path),
            ("recognition", &self.recognition_model_path),
        ] {
            if !path.exists() {
                return Err(FormscanError::OcrError(format!(
                    "{} model not found at {}; run `ocrs-cli` once to download models",
                    kind,
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Text recogniser fed by the enhancement pipeline.
///
/// Loading the models is the expensive part; build one engine and reuse it.
/// Build `ocrs` and `rten` in release mode, debug builds are 10-100x slower.
pub struct OcrEngine {
    engine: OcrsEngine,
}

impl OcrEngine {
    /// Load the detection and recognition models named in `config`.
    #[instrument(skip_all, fields(
        detection = %config.detection_model_path.display(),
        recognition = %config.recognition_model_path.display(),
    ))]
    pub fn new(config: OcrConfig) -> Result<Self> {
        config.validate()?;

        let load = |path: &Path| {
            Model::load_file(path).map_err(|err| {
                FormscanError::OcrError(format!(
                    "failed to load model from {}: {}",
                    path.display(),
                    err
                ))
            })
        };
        info!("Loading OCR models");
        let detection_model = load(&config.detection_model_path)?;
        let recognition_model = load(&config.recognition_model_path)?;

        let engine = OcrsEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| FormscanError::OcrError(format!("failed to initialise OCR engine: {}", err)))?;

        info!("OCR engine ready");
        Ok(Self { engine })
    }

    /// Extract the text of an image, one recognised line per output line.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn recognize_text(&self, image: &DynamicImage) -> Result<String> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            FormscanError::OcrError(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;
        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| FormscanError::OcrError(format!("OCR input preparation failed: {}", err)))?;
        let text = self
            .engine
            .get_text(&input)
            .map_err(|err| FormscanError::OcrError(format!("OCR text recognition failed: {}", err)))?;

        debug!(
            line_count = text.lines().count(),
            char_count = text.len(),
            "OCR recognition complete"
        );
        Ok(text)
    }

    /// Recognise text in the encoded output of a preprocessor.
    #[instrument(skip(self, processed), fields(data_len = processed.len()))]
    pub fn recognize_encoded(&self, processed: &[u8]) -> Result<String> {
        let (image, _) = codec::decode(processed)?;
        self.recognize_text(&image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_well_known_filenames() {
        let config = OcrConfig::default();
        assert!(config.detection_model_path.ends_with(DETECTION_MODEL_FILENAME));
        assert!(config.recognition_model_path.ends_with(RECOGNITION_MODEL_FILENAME));
    }

    #[test]
    fn config_from_dir() {
        let config = OcrConfig::from_dir("/tmp/my-models");
        assert_eq!(
            config.detection_model_path,
            PathBuf::from("/tmp/my-models/text-detection.rten")
        );
    }

    #[test]
    fn missing_models_fail_validation() {
        let config = OcrConfig::from_dir("/nonexistent/path/ocr-models");
        assert!(matches!(config.validate(), Err(FormscanError::OcrError(_))));
        assert!(OcrEngine::new(config).is_err());
    }

    #[test]
    fn recognize_encoded_rejects_undecodable_bytes() {
        // Only meaningful where the models have been downloaded.
        let Ok(engine) = OcrEngine::new(OcrConfig::default()) else {
            return;
        };
        assert!(matches!(
            engine.recognize_encoded(b"not an image"),
            Err(FormscanError::Decode(_))
        ));
    }
}
