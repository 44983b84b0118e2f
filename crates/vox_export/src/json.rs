//! # JSON Export
//!
//! Field names follow the decoded model. Tags and attribute strings are
//! emitted as text, palette entries as `[r, g, b, a]`, voxels as objects.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};
use vox_format::{
    ChunkHeader, DecodedModel, Decoder, Extents, GroupNode, Header, Model, NodeId, Palette,
    TransformNode,
};

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};

/// The parts of a model an [`ExportConfig`] lets through.
#[derive(Serialize)]
struct ExportView<'a> {
    header: &'a Header,
    main: &'a Extents,
    models: &'a [Model],
    #[serde(skip_serializing_if = "Option::is_none")]
    palette: Option<Option<&'a Palette>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transform_nodes: Option<&'a BTreeMap<NodeId, TransformNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_nodes: Option<&'a BTreeMap<NodeId, GroupNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<&'a [ChunkHeader]>,
}

impl<'a> ExportView<'a> {
    fn new(model: &'a DecodedModel, config: &ExportConfig) -> Self {
        Self {
            header: &model.header,
            main: &model.main,
            models: &model.models,
            // A file without an RGBA chunk still shows `"palette": null`.
            palette: config.include_palette.then_some(model.palette.as_ref()),
            transform_nodes: config.include_scene.then_some(&model.transform_nodes),
            group_nodes: config.include_scene.then_some(&model.group_nodes),
            skipped: config.include_skipped.then_some(model.skipped.as_slice()),
        }
    }
}

/// Writes `model` as JSON to `writer`.
///
/// # Errors
///
/// `Json` if serialization or the underlying write fails.
pub fn write_json<W: Write>(
    model: &DecodedModel,
    writer: W,
    config: &ExportConfig,
) -> ExportResult<()> {
    let view = ExportView::new(model, config);
    if config.pretty {
        let indent = vec![b' '; config.indent];
        let mut serializer =
            serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(&indent));
        view.serialize(&mut serializer)?;
    } else {
        let mut serializer = serde_json::Serializer::with_formatter(writer, CompactFormatter);
        view.serialize(&mut serializer)?;
    }
    Ok(())
}

/// Renders `model` as a JSON string.
///
/// # Errors
///
/// `Json` if serialization fails.
pub fn to_json_string(model: &DecodedModel, config: &ExportConfig) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_json(model, &mut buf, config)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Decodes `input` and writes it as JSON to `output`.
///
/// The output file is only created once decoding has succeeded.
///
/// # Errors
///
/// `InvalidPath` for an empty path, `Decode` if the input cannot be decoded,
/// `Io` or `Json` if writing fails.
pub fn convert_to_json(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ExportConfig,
) -> ExportResult<()> {
    let (input, output) = (input.as_ref(), output.as_ref());
    for (what, path) in [("input", input), ("output", output)] {
        if path.as_os_str().is_empty() {
            return Err(ExportError::InvalidPath(format!("empty {what} path")));
        }
    }

    let model = Decoder::with_options(config.decode).decode_file(input)?;
    tracing::debug!("decoded {} into {} model(s)", input.display(), model.models.len());

    let mut writer = BufWriter::new(File::create(output)?);
    write_json(&model, &mut writer, config)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
