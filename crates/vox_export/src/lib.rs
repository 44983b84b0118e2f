//! # VOX Export
//!
//! JSON presentation of decoded `.vox` models, driven by a TOML
//! [`ExportConfig`]. The `vox2json` binary is a thin front-end over
//! [`convert_to_json`].
//!
//! ```rust,ignore
//! use vox_export::{convert_to_json, ExportConfig};
//!
//! convert_to_json("sword.vox", "sword.json", &ExportConfig::default())?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod json;
pub mod summary;

pub use config::ExportConfig;
pub use error::{ExportError, ExportResult};
pub use json::{convert_to_json, to_json_string, write_json};
pub use summary::ModelSummary;
