//! # Vox Facade
//!
//! Convenience view over a decoded file's primary model: per-voxel color
//! lookup, column access for bulk consumers, counts and grid volume.

use std::path::Path;

use crate::decoder::Decoder;
use crate::error::{VoxError, VoxResult};
use crate::geometry::{Dimensions, Voxel};
use crate::model::DecodedModel;
use crate::palette::{Palette, Rgba};

/// File extension accepted by [`Vox::open`].
pub const VOX_EXTENSION: &str = "vox";

/// A decoded `.vox` file seen through its first model.
#[derive(Debug, Clone)]
pub struct Vox {
    model: DecodedModel,
    palette: Palette,
}

impl Vox {
    /// Decodes the file at `path`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the path is empty, has no file stem or does not end
    /// in exactly `.vox` (case-sensitive); otherwise whatever decoding the
    /// file reports.
    pub fn open(path: impl AsRef<Path>) -> VoxResult<Self> {
        Self::open_with(&Decoder::new(), path)
    }

    /// Decodes the file at `path` with a configured decoder.
    ///
    /// # Errors
    ///
    /// See [`Vox::open`].
    pub fn open_with(decoder: &Decoder, path: impl AsRef<Path>) -> VoxResult<Self> {
        let path = path.as_ref();
        let has_stem = path
            .file_stem()
            .is_some_and(|stem| !stem.is_empty());
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext == VOX_EXTENSION);
        if !has_stem || !has_extension {
            return Err(VoxError::InvalidInput(format!(
                "invalid file path {:?}: expected <name>.{VOX_EXTENSION}",
                path.display().to_string()
            )));
        }
        decoder.decode_file(path).map(Self::from_model)
    }

    /// Decodes an in-memory buffer.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> VoxResult<Self> {
        Decoder::new().decode_bytes(bytes).map(Self::from_model)
    }

    /// Wraps an already decoded model.
    #[must_use]
    pub fn from_model(model: DecodedModel) -> Self {
        let palette = model.palette_or_default();
        Self { model, palette }
    }

    /// The full decode result.
    #[must_use]
    pub fn model(&self) -> &DecodedModel {
        &self.model
    }

    /// Palette in use: the file's own, or the built-in one.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Dimensions of the primary model.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.model.dimensions().unwrap_or_default()
    }

    /// All voxels of the primary model.
    #[must_use]
    pub fn voxels(&self) -> &[Voxel] {
        self.model.voxels()
    }

    /// Voxel at `index`.
    #[must_use]
    pub fn voxel(&self, index: usize) -> Option<Voxel> {
        self.voxels().get(index).copied()
    }

    /// Palette color index of the voxel at `index`.
    #[must_use]
    pub fn palette_id(&self, index: usize) -> Option<u8> {
        self.voxel(index).map(|v| v.color_index)
    }

    /// Resolved color of the voxel at `index`.
    ///
    /// Color index `i` resolves to palette entry `i - 1`. A voxel with index
    /// 0 has no color.
    #[must_use]
    pub fn rgba(&self, index: usize) -> Option<Rgba> {
        self.palette_id(index).and_then(|i| self.palette.resolve(i))
    }

    /// Number of voxels.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.voxels().len()
    }

    /// Grid volume: product of the three dimensions.
    #[must_use]
    pub fn size(&self) -> i64 {
        self.dimensions().volume()
    }

    /// `(x, y, z)` of every voxel.
    #[must_use]
    pub fn coords(&self) -> Vec<[i8; 3]> {
        self.voxels().iter().map(Voxel::position).collect()
    }

    /// X column.
    #[must_use]
    pub fn xs(&self) -> Vec<i8> {
        self.voxels().iter().map(|v| v.x).collect()
    }

    /// Y column.
    #[must_use]
    pub fn ys(&self) -> Vec<i8> {
        self.voxels().iter().map(|v| v.y).collect()
    }

    /// Z column.
    #[must_use]
    pub fn zs(&self) -> Vec<i8> {
        self.voxels().iter().map(|v| v.z).collect()
    }

    /// Color index column.
    #[must_use]
    pub fn color_indices(&self) -> Vec<u8> {
        self.voxels().iter().map(|v| v.color_index).collect()
    }
}
