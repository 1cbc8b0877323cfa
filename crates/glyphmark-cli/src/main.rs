// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyphmark — font atlas separator marker.
//
// Entry point. Initialises logging, resolves configuration, marks the atlas,
// and reports the result.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use glyphmark_core::MarkReport;
use glyphmark_core::error::Result;
use glyphmark_core::human_errors::{HumanError, Severity, humanize_error};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Glyphmark failed");
            eprintln!("{}", failure_message(&humanize_error(&err)));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.marker_config()?;
    let input = config.resolved_input();
    let output = config.resolved_output();

    let report = if cli.dry_run {
        glyphmark_image::scan_file(&input)?
    } else {
        glyphmark_image::mark_file(&input, &output)?
    };

    if cli.json {
        let json = serde_json::json!({
            "input": input,
            "output": if cli.dry_run { None } else { Some(&output) },
            "width": report.width,
            "height": report.height,
            "columns": report.columns(),
            "spans": report.spans(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", summary(&report));
        if !cli.dry_run {
            println!("wrote {}", output.display());
        }
    }
    Ok(())
}

/// Stderr text for a failure, prefixed by what the user can do about it.
fn failure_message(human: &HumanError) -> String {
    let prefix = match human.severity {
        Severity::ActionRequired => "action required",
        Severity::Permanent => "error",
    };
    format!("{prefix}: {human}")
}

/// One-line description of a report, e.g. `marked 4 columns in 2 spans: 1..4, 9`.
fn summary(report: &MarkReport) -> String {
    let spans = report.spans();
    if spans.is_empty() {
        return "marked 0 columns".to_string();
    }
    let listed: Vec<String> = spans.iter().map(ToString::to_string).collect();
    format!(
        "marked {} in {}: {}",
        plural(report.marked_count(), "column"),
        plural(spans.len(), "span"),
        listed.join(", ")
    )
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_spans() {
        let mut report = MarkReport::new(12, 2);
        for x in [1, 2, 3, 9] {
            report.push(x);
        }
        assert_eq!(summary(&report), "marked 4 columns in 2 spans: 1..4, 9");
    }

    #[test]
    fn summary_uses_singular_for_one() {
        let mut report = MarkReport::new(3, 2);
        report.push(1);
        assert_eq!(summary(&report), "marked 1 column in 1 span: 1");
    }

    #[test]
    fn failure_prefix_follows_severity() {
        let missing = humanize_error(&glyphmark_core::GlyphmarkError::decode(
            "img_font.png",
            "No such file or directory (os error 2)",
        ));
        assert!(failure_message(&missing).starts_with("action required: "));

        let invalid = humanize_error(&glyphmark_core::GlyphmarkError::InvalidConfig("x".into()));
        assert!(failure_message(&invalid).starts_with("error: "));
    }

    #[test]
    fn summary_of_empty_report() {
        assert_eq!(summary(&MarkReport::new(3, 3)), "marked 0 columns");
    }
}
