//! Human-readable summary of a decoded model, printed by `vox2json info`.

use std::fmt;

use vox_format::DecodedModel;

/// Display adapter over a [`DecodedModel`].
#[derive(Debug, Clone, Copy)]
pub struct ModelSummary<'a> {
    model: &'a DecodedModel,
}

impl<'a> ModelSummary<'a> {
    /// Wraps a model for display.
    #[must_use]
    pub fn new(model: &'a DecodedModel) -> Self {
        Self { model }
    }
}

impl fmt::Display for ModelSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.model;
        writeln!(f, "version: {}", model.header.version)?;
        writeln!(f, "models: {}", model.models.len())?;
        for (i, m) in model.models.iter().enumerate() {
            let d = m.dimensions;
            writeln!(
                f,
                "  [{i}] {}x{}x{} (volume {}), {} voxel(s)",
                d.width,
                d.height,
                d.depth,
                m.volume(),
                m.voxels.len()
            )?;
        }
        writeln!(
            f,
            "palette: {}",
            if model.palette.is_some() { "file" } else { "default" }
        )?;
        writeln!(
            f,
            "scene: {} transform node(s), {} group node(s)",
            model.transform_nodes.len(),
            model.group_nodes.len()
        )?;
        write!(f, "skipped: {} chunk(s)", model.skipped.len())?;
        if !model.skipped.is_empty() {
            let tags: Vec<String> = model.skipped.iter().map(|h| h.tag.to_string()).collect();
            write!(f, " ({})", tags.join(", "))?;
        }
        Ok(())
    }
}
