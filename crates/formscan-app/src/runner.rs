// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Argument definitions and the file-to-file run behind the `formscan` binary.

use std::path::{Path, PathBuf};

use clap::Parser;
use formscan_core::ScanConfig;
use formscan_core::error::Result;
use formscan_enhance::PreprocessorRegistry;
use formscan_enhance::codec;
use tracing::{debug, info, instrument};

/// Clean up a photographed form so text recognition can read it.
#[derive(Parser, Debug)]
#[command(name = "formscan", version, author, long_about = None)]
pub struct Args {
    /// Image to process (JPEG, PNG, TIFF, BMP, ...)
    #[arg(required_unless_present = "list")]
    pub input: Option<PathBuf>,

    /// Where to write the result (default: <input>_<preprocessor>.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preprocessor to use (default: the one named in the config)
    #[arg(short, long)]
    pub preprocessor: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the registered preprocessors and exit
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Run text recognition on the processed image and print the text
    #[cfg(feature = "ocr")]
    #[arg(long, default_value_t = false)]
    pub recognize: bool,

    /// Enable verbose logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// What a successful run produced.
#[derive(Debug)]
pub enum Outcome {
    Listed(Vec<&'static str>),
    Written(PathBuf),
    #[cfg(feature = "ocr")]
    Recognized { path: PathBuf, text: String },
}

#[instrument(skip_all)]
pub fn run(args: &Args) -> Result<Outcome> {
    let config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            ScanConfig::load(path)?
        }
        None => ScanConfig::default(),
    };
    let registry = PreprocessorRegistry::with_defaults(&config)?;

    let input = match (&args.input, args.list) {
        (_, true) | (None, _) => return Ok(Outcome::Listed(registry.available())),
        (Some(input), false) => input,
    };

    let preprocessor = match &args.preprocessor {
        Some(name) => registry.get(name),
        None => registry.default_preprocessor(),
    };
    info!(
        input = %input.display(),
        preprocessor = preprocessor.name(),
        "Processing image"
    );

    let data = std::fs::read(input)?;
    let processed = preprocessor.preprocess(&data)?;

    let output = match &args.output {
        Some(path) => path.clone(),
        None => {
            let extension = image::guess_format(&processed)
                .map(codec::extension_for)
                .unwrap_or("png");
            default_output_path(input, preprocessor.name(), extension)
        }
    };
    std::fs::write(&output, &processed)?;
    debug!(output = %output.display(), bytes = processed.len(), "Processed image written");

    #[cfg(feature = "ocr")]
    {
        if args.recognize {
            let engine = formscan_enhance::OcrEngine::new(Default::default())?;
            let text = engine.recognize_encoded(&processed)?;
            return Ok(Outcome::Recognized { path: output, text });
        }
    }

    Ok(Outcome::Written(output))
}

/// `<dir>/<stem>_<suffix>.<extension>`, next to the input file.
pub fn default_output_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scan".into());
    input.with_file_name(format!("{stem}_{suffix}.{extension}"))
}
