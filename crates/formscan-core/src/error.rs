// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for formscan.

use thiserror::Error;

/// Top-level error type for all formscan operations.
#[derive(Debug, Error)]
pub enum FormscanError {
    // -- Input errors --
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("image has zero-sized dimensions ({width}x{height})")]
    Dimension { width: u32, height: u32 },

    // -- Pipeline errors --
    #[error("enhancement stage failed: {0}")]
    Processing(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("OCR failed: {0}")]
    OcrError(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FormscanError>;
