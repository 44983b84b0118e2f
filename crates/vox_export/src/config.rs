//! # Export Configuration
//!
//! Loaded from TOML. Every key is optional.
//!
//! ```toml
//! pretty = true
//! indent = 4
//! include_palette = true
//! include_scene = true
//! include_skipped = false
//!
//! [decode]
//! verify_magic = true
//! ```

use std::path::Path;

use serde::Deserialize;
use vox_format::DecodeOptions;

use crate::error::ExportResult;

/// How a decoded model is rendered as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Indented output. Compact single-line JSON otherwise.
    pub pretty: bool,
    /// Spaces per indentation level when `pretty` is set.
    pub indent: usize,
    /// Emit the `palette` field.
    pub include_palette: bool,
    /// Emit `transform_nodes` and `group_nodes`.
    pub include_scene: bool,
    /// Emit headers of chunks that were skipped by length.
    pub include_skipped: bool,
    /// Options handed to the decoder.
    pub decode: DecodeOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: 4,
            include_palette: true,
            include_scene: true,
            include_skipped: false,
            decode: DecodeOptions::default(),
        }
    }
}

impl ExportConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// `Config` if the text is not valid TOML or names an unknown key.
    pub fn from_toml_str(text: &str) -> ExportResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`ExportConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("loaded export configuration from {}", path.display());
        Ok(config)
    }

    /// Same configuration with single-line output.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}
