// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// formscan - Form Scan Enhancer
//
// Entry point. Parses arguments, initialises logging, runs the chosen
// preprocessor on one image and writes the result next to it.

mod runner;

use std::process::ExitCode;

use clap::Parser;

use formscan_core::human_errors::humanize_error;
use runner::{Args, Outcome};

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("formscan starting");

    match runner::run(&args) {
        Ok(Outcome::Listed(names)) => {
            for name in names {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::Written(path)) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        #[cfg(feature = "ocr")]
        Ok(Outcome::Recognized { path, text }) => {
            tracing::info!(path = %path.display(), "Processed image written");
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "formscan failed");
            let human = humanize_error(&err);
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}
