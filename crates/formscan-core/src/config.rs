// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration, loadable from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FormscanError, Result};
use crate::types::{ClosingMode, OutputFormat};

/// Tuning knobs for the adaptive enhancement pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// The local window side is `max(width, height) / window_divisor`.
    pub window_divisor: u32,
    /// Lower bound on the local window side, in pixels.
    pub min_window: u32,
    /// Subtracted from the local mean before comparing a pixel against it.
    pub bias: i32,
    /// What the final closing stage does.
    pub closing: ClosingMode,
    /// Encoding of the processed image. Applies to every registered
    /// preprocessor, not only the adaptive pipeline.
    pub output_format: OutputFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_divisor: 20,
            min_window: 15,
            bias: 10,
            closing: ClosingMode::Passthrough,
            output_format: OutputFormat::SameAsInput,
        }
    }
}

impl PipelineConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.window_divisor == 0 {
            return Err(FormscanError::Config(
                "window_divisor must be at least 1".into(),
            ));
        }
        if self.min_window == 0 {
            return Err(FormscanError::Config("min_window must be at least 1".into()));
        }
        Ok(())
    }
}

/// Top-level settings: which preprocessor to use by default and how each one
/// is tuned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Registry name used when a caller asks for an unknown preprocessor.
    pub default_preprocessor: String,
    /// Cut-off for the `basic` preprocessor (pixels above it become white).
    pub global_threshold: u8,
    /// Settings for the `enhanced` preprocessor.
    pub pipeline: PipelineConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            default_preprocessor: "enhanced".into(),
            global_threshold: 127,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Load and validate a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_preprocessor.trim().is_empty() {
            return Err(FormscanError::Config(
                "default_preprocessor must not be empty".into(),
            ));
        }
        self.pipeline.validate()
    }
}
