// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command line.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::GlyphmarkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User must do something (fix a path, free disk space, fix permissions).
    ActionRequired,
    /// Cannot be fixed by retrying: unreadable image, invalid settings.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n  {}", self.message, self.suggestion)
    }
}

/// Convert a `GlyphmarkError` into a `HumanError`.
pub fn humanize_error(err: &GlyphmarkError) -> HumanError {
    match err {
        GlyphmarkError::Decode { path, reason } => {
            if is_not_found(reason) {
                HumanError {
                    message: format!("The atlas image {} couldn't be found.", path.display()),
                    suggestion: "Check the input path, or pass --dir to point at the asset directory.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: format!("The image {} couldn't be read.", path.display()),
                    suggestion: format!("The file may be damaged or in an unsupported format. Try re-exporting it as PNG. ({reason})"),
                    severity: Severity::Permanent,
                }
            }
        }

        GlyphmarkError::Encode { path, reason } => HumanError {
            message: format!("The marked image couldn't be written to {}.", path.display()),
            suggestion: format!("Make sure the directory exists, is writable, and the extension names a supported format. ({reason})"),
            severity: Severity::ActionRequired,
        },

        GlyphmarkError::InvalidConfig(detail) => HumanError {
            message: "The settings aren't valid.".into(),
            suggestion: format!("Fix the arguments or the config file, then run again. ({detail})"),
            severity: Severity::Permanent,
        },

        GlyphmarkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "A file couldn't be found.".into(),
                    suggestion: format!("Check the path you passed. ({io_err})"),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Permission denied.".into(),
                    suggestion: format!("Check the file permissions. ({io_err})"),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "A file operation failed.".into(),
                    suggestion: format!("{io_err}"),
                    severity: Severity::ActionRequired,
                }
            }
        }

        GlyphmarkError::Serialization(detail) => HumanError {
            message: "The config file couldn't be parsed.".into(),
            suggestion: format!("The config file must be JSON with optional \"input\", \"output\" and \"base_dir\" keys. ({detail})"),
            severity: Severity::Permanent,
        },
    }
}

fn is_not_found(reason: &str) -> bool {
    let lower = reason.to_ascii_lowercase();
    lower.contains("no such file") || lower.contains("not found") || lower.contains("cannot find")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_action_required() {
        let err = GlyphmarkError::decode("img_font.png", "No such file or directory (os error 2)");
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.message.contains("img_font.png"));
    }

    #[test]
    fn corrupt_input_is_permanent() {
        let err = GlyphmarkError::decode("img_font.png", "Format error decoding Png: invalid signature");
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn unwritable_output_is_action_required() {
        let err = GlyphmarkError::encode("/missing/font.png", "No such file or directory");
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.message.contains("/missing/font.png"));
    }

    #[test]
    fn invalid_config_is_permanent() {
        let human = humanize_error(&GlyphmarkError::InvalidConfig("same path".into()));
        assert_eq!(human.severity, Severity::Permanent);
        assert!(human.suggestion.contains("same path"));
    }
}
