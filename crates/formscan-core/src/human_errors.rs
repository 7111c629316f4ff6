// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for people scanning forms.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Nothing in the pipeline is retried, so the severity only says whether the
// user can fix the problem themselves.

use crate::error::FormscanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User must do something (retake the photo, fix a setting, pick another file).
    ActionRequired,
    /// Cannot be fixed by the user; indicates a defect or an unsupported setup.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `FormscanError` into a `HumanError`.
pub fn humanize_error(err: &FormscanError) -> HumanError {
    match err {
        FormscanError::Decode(_) => HumanError {
            message: "This file couldn't be read as a picture.".into(),
            suggestion: "The file may be damaged or in an unusual format. Try saving the scan as a JPEG or PNG first.".into(),
            severity: Severity::ActionRequired,
        },

        FormscanError::Dimension { width, height } => HumanError {
            message: "The picture is empty.".into(),
            suggestion: format!(
                "The image has no pixels ({width}x{height}). Take the photo of the form again."
            ),
            severity: Severity::ActionRequired,
        },

        FormscanError::Processing(detail) => HumanError {
            message: "Cleaning up the scan failed unexpectedly.".into(),
            suggestion: format!("This is a bug; please report it. ({detail})"),
            severity: Severity::Permanent,
        },

        FormscanError::Encode(_) => HumanError {
            message: "The cleaned-up scan couldn't be saved in that format.".into(),
            suggestion: "Try choosing PNG as the output format.".into(),
            severity: Severity::ActionRequired,
        },

        FormscanError::OcrError(_) => HumanError {
            message: "Text recognition didn't work on this scan.".into(),
            suggestion: "Check that the recognition models are installed, then try again with a sharper, well-lit photo.".into(),
            severity: Severity::ActionRequired,
        },

        FormscanError::Config(detail) => HumanError {
            message: "The settings file has a mistake.".into(),
            suggestion: format!("Fix the setting and try again: {detail}."),
            severity: Severity::ActionRequired,
        },

        FormscanError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "There's no permission to read or write that file.".into(),
                    suggestion: "Check the file permissions, or choose a different location.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    severity: Severity::ActionRequired,
                }
            }
        }

        FormscanError::Serialization(_) => HumanError {
            message: "The settings file isn't valid JSON.".into(),
            suggestion: "Check the file for missing commas or quotes.".into(),
            severity: Severity::ActionRequired,
        },
    }
}
