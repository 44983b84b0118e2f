//! # Decoded Model
//!
//! The single value a successful decode produces. Chunks are folded into it
//! by a [`ModelBuilder`] that the dispatch loop owns for the duration of one
//! decode; once [`ModelBuilder::finish`] returns, the model is never touched
//! again by the decoder.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chunk::{Chunk, ChunkHeader};
use crate::geometry::{Dimensions, Voxel};
use crate::palette::Palette;
use crate::scene::{GroupNode, NodeId, TransformNode};
use crate::tag::ChunkTag;

/// File header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Format magic, `"VOX "` in every valid file.
    pub magic: ChunkTag,
    /// Format version (150 or 200 in current files).
    pub version: i32,
}

/// Declared byte extents of the root `MAIN` container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Extents {
    /// Bytes of MAIN's own payload (zero in practice).
    pub content_length: u32,
    /// Bytes occupied by the chunk tree under MAIN.
    pub children_length: u32,
}

/// One model: a `SIZE` chunk and the `XYZI` chunk that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    /// Grid extents.
    pub dimensions: Dimensions,
    /// Voxels, exactly as many as the chunk declared.
    pub voxels: Vec<Voxel>,
}

impl Model {
    /// Product of the three dimensions.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> i64 {
        self.dimensions.volume()
    }
}

/// Everything decoded from one `.vox` source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedModel {
    /// File header.
    pub header: Header,
    /// Root container extents.
    pub main: Extents,
    /// Models in file order.
    pub models: Vec<Model>,
    /// Palette from the `RGBA` chunk, if the file has one.
    pub palette: Option<Palette>,
    /// Transform nodes keyed by node ID.
    pub transform_nodes: BTreeMap<NodeId, TransformNode>,
    /// Group nodes keyed by node ID.
    pub group_nodes: BTreeMap<NodeId, GroupNode>,
    /// Headers of chunks skipped by length.
    pub skipped: Vec<ChunkHeader>,
}

impl DecodedModel {
    /// The first model in the file.
    #[must_use]
    pub fn primary(&self) -> Option<&Model> {
        self.models.first()
    }

    /// Dimensions of the first model.
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.primary().map(|m| m.dimensions)
    }

    /// Voxels of the first model; empty if the file has none.
    #[must_use]
    pub fn voxels(&self) -> &[Voxel] {
        self.primary().map(|m| m.voxels.as_slice()).unwrap_or_default()
    }

    /// The file's palette, or MagicaVoxel's built-in one.
    #[must_use]
    pub fn palette_or_default(&self) -> Palette {
        self.palette.clone().unwrap_or_default()
    }

    /// Returns true if the file carries any scene-graph nodes.
    #[must_use]
    pub fn has_scene(&self) -> bool {
        !self.transform_nodes.is_empty() || !self.group_nodes.is_empty()
    }
}

/// Accumulator threaded through the dispatch loop.
#[derive(Debug)]
pub struct ModelBuilder {
    header: Header,
    main: Extents,
    models: Vec<Model>,
    pending_size: Option<Dimensions>,
    palette: Option<Palette>,
    transform_nodes: BTreeMap<NodeId, TransformNode>,
    group_nodes: BTreeMap<NodeId, GroupNode>,
    skipped: Vec<ChunkHeader>,
}

impl ModelBuilder {
    /// Starts a model for the given header and root extents.
    #[must_use]
    pub fn new(header: Header, main: Extents) -> Self {
        Self {
            header,
            main,
            models: Vec::new(),
            pending_size: None,
            palette: None,
            transform_nodes: BTreeMap::new(),
            group_nodes: BTreeMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Folds one decoded chunk in.
    pub fn push(&mut self, chunk: Chunk) {
        match chunk {
            Chunk::Size(dimensions) => {
                if let Some(orphan) = self.pending_size.replace(dimensions) {
                    tracing::warn!("SIZE chunk {orphan:?} has no XYZI chunk; keeping it empty");
                    self.models.push(Model {
                        dimensions: orphan,
                        voxels: Vec::new(),
                    });
                }
            }
            Chunk::Voxels(voxels) => {
                let dimensions = self.pending_size.take().unwrap_or_else(|| {
                    tracing::warn!("XYZI chunk without a preceding SIZE chunk");
                    Dimensions::default()
                });
                self.models.push(Model { dimensions, voxels });
            }
            Chunk::Palette(palette) => {
                if self.palette.replace(palette).is_some() {
                    tracing::warn!("second RGBA chunk replaces the first");
                }
            }
            Chunk::Transform(id, node) => {
                if self.transform_nodes.insert(id, node).is_some() {
                    tracing::warn!("transform node {id} defined twice; keeping the later one");
                }
            }
            Chunk::Group(id, node) => {
                if self.group_nodes.insert(id, node).is_some() {
                    tracing::warn!("group node {id} defined twice; keeping the later one");
                }
            }
            Chunk::Skipped(header) => self.skipped.push(header),
        }
    }

    /// Completes the model.
    #[must_use]
    pub fn finish(mut self) -> DecodedModel {
        if let Some(orphan) = self.pending_size.take() {
            tracing::warn!("SIZE chunk {orphan:?} has no XYZI chunk; keeping it empty");
            self.models.push(Model {
                dimensions: orphan,
                voxels: Vec::new(),
            });
        }
        DecodedModel {
            header: self.header,
            main: self.main,
            models: self.models,
            palette: self.palette,
            transform_nodes: self.transform_nodes,
            group_nodes: self.group_nodes,
            skipped: self.skipped,
        }
    }
}
