// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command line arguments and their merge with the config file.

use std::path::PathBuf;

use clap::Parser;
use glyphmark_core::MarkerConfig;
use glyphmark_core::error::Result;

/// Draws yellow separators over every column of a font atlas that contains
/// green pixels.
#[derive(Debug, Parser)]
#[command(name = "glyphmark", version, about)]
pub struct Cli {
    /// Atlas image to read [default: img_font.png]
    pub input: Option<PathBuf>,

    /// Where to write the marked atlas [default: font.png]
    pub output: Option<PathBuf>,

    /// Resolve relative input and output paths against this directory
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// JSON config file with "input", "output" and "base_dir" keys
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only report which columns would be marked; write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the mark report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the effective config: flags override the config file, which
    /// overrides the defaults.
    pub fn marker_config(&self) -> Result<MarkerConfig> {
        let mut config = match &self.config {
            Some(path) => MarkerConfig::load(path)?,
            None => MarkerConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(dir) = &self.dir {
            config.base_dir = Some(dir.clone());
        }
        config.validate()?;
        Ok(config)
    }
}
