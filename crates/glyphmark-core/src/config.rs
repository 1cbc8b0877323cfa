// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Marker configuration: where to read the atlas and where to write the
// marked copy.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GlyphmarkError, Result};

/// Default atlas file read when no input is given.
pub const DEFAULT_INPUT: &str = "img_font.png";
/// Default file the marked atlas is written to.
pub const DEFAULT_OUTPUT: &str = "font.png";

/// Settings for one marking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Source atlas image.
    pub input: PathBuf,
    /// Destination of the marked image. Format follows the extension.
    pub output: PathBuf,
    /// Directory that relative `input` and `output` paths are resolved against.
    /// When unset they are relative to the process working directory.
    pub base_dir: Option<PathBuf>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            base_dir: None,
        }
    }
}

impl MarkerConfig {
    /// Read a JSON config file. Keys that are absent take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        debug!(path = %path.display(), ?config, "Config loaded");
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn resolved_input(&self) -> PathBuf {
        self.resolve(&self.input)
    }

    pub fn resolved_output(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    /// Reject configurations that would overwrite the source atlas.
    pub fn validate(&self) -> Result<()> {
        let input = self.resolved_input();
        let output = self.resolved_output();
        if input.as_os_str().is_empty() || output.as_os_str().is_empty() {
            return Err(GlyphmarkError::InvalidConfig(
                "input and output paths must not be empty".into(),
            ));
        }
        let same = match (input.canonicalize(), output.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => input == output,
        };
        if same {
            return Err(GlyphmarkError::InvalidConfig(format!(
                "output {} would overwrite the input image",
                output.display()
            )));
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_atlas_filenames() {
        let config = MarkerConfig::default();
        assert_eq!(config.resolved_input(), PathBuf::from("img_font.png"));
        assert_eq!(config.resolved_output(), PathBuf::from("font.png"));
    }

    #[test]
    fn base_dir_applies_to_relative_paths_only() {
        let config = MarkerConfig {
            input: PathBuf::from("atlas.png"),
            output: PathBuf::from("/abs/out.png"),
            base_dir: Some(PathBuf::from("/assets")),
        };
        assert_eq!(config.resolved_input(), PathBuf::from("/assets/atlas.png"));
        assert_eq!(config.resolved_output(), PathBuf::from("/abs/out.png"));
    }

    #[test]
    fn same_input_and_output_is_rejected() {
        let config = MarkerConfig {
            input: PathBuf::from("atlas.png"),
            output: PathBuf::from("atlas.png"),
            base_dir: None,
        };
        assert!(matches!(
            config.validate(),
            Err(GlyphmarkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn default_config_is_valid() {
        MarkerConfig::default().validate().expect("valid");
    }

    #[test]
    fn load_fills_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("glyphmark.json");
        std::fs::write(&path, r#"{ "input": "atlas.png" }"#).expect("write");

        let config = MarkerConfig::load(&path).expect("load");
        assert_eq!(config.input, PathBuf::from("atlas.png"));
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(config.base_dir.is_none());
    }

    #[test]
    fn persist_then_load_preserves_base_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("glyphmark.json");
        let config = MarkerConfig {
            base_dir: Some(dir.path().to_path_buf()),
            ..MarkerConfig::default()
        };
        config.persist(&path).expect("persist");
        assert_eq!(MarkerConfig::load(&path).expect("load"), config);
    }

    #[test]
    fn malformed_config_is_a_serialization_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("glyphmark.json");
        std::fs::write(&path, "not json").expect("write");
        assert!(matches!(
            MarkerConfig::load(&path),
            Err(GlyphmarkError::Serialization(_))
        ));
    }
}
