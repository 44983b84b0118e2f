//! # Geometry Chunks
//!
//! ```text
//! SIZE:  int32 x, int32 y, int32 z
//! XYZI:  int32 count, then count x { int8 x, int8 y, int8 z, uint8 colorIndex }
//! ```
//!
//! Values are passed through as read. Sizes of zero or below, and positions
//! outside the declared size, are the caller's business.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::error::VoxResult;
use crate::reader::BodyReader;

/// Byte size of a `SIZE` chunk body.
pub const SIZE_BYTES: usize = 12;

/// Byte size of one `XYZI` voxel record.
pub const VOXEL_BYTES: usize = 4;

/// Grid extents of one model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    /// Size along X.
    pub width: i32,
    /// Size along Y.
    pub height: i32,
    /// Size along Z.
    pub depth: i32,
}

impl Dimensions {
    /// Creates new dimensions.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32, depth: i32) -> Self {
        Self { width, height, depth }
    }

    /// Decodes a `SIZE` chunk body.
    pub fn decode(body: &mut BodyReader<'_>) -> VoxResult<Self> {
        Ok(Self {
            width: body.read_i32()?,
            height: body.read_i32()?,
            depth: body.read_i32()?,
        })
    }

    /// Number of cells in the grid.
    ///
    /// Computed in i64 so that no i32 triple can overflow it.
    #[inline]
    #[must_use]
    pub const fn volume(&self) -> i64 {
        self.width as i64 * self.height as i64 * self.depth as i64
    }
}

/// One voxel record from an `XYZI` chunk.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize)]
pub struct Voxel {
    /// X position, read as a signed byte.
    pub x: i8,
    /// Y position, read as a signed byte.
    pub y: i8,
    /// Z position, read as a signed byte.
    pub z: i8,
    /// Palette color index (1..=255; see [`crate::Palette::resolve`]).
    pub color_index: u8,
}

impl Voxel {
    /// Creates a voxel.
    #[inline]
    #[must_use]
    pub const fn new(x: i8, y: i8, z: i8, color_index: u8) -> Self {
        Self { x, y, z, color_index }
    }

    /// Position as read.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> [i8; 3] {
        [self.x, self.y, self.z]
    }

    /// Position with the raw bytes reinterpreted as unsigned, covering the
    /// full 0..=255 range MagicaVoxel can emit.
    #[inline]
    #[must_use]
    pub fn grid_position(&self) -> [u8; 3] {
        self.position().map(|c| c.to_le_bytes()[0])
    }
}

/// Decodes an `XYZI` chunk body.
///
/// The declared count is checked against the body length before anything is
/// allocated, so the returned list always holds exactly `count` voxels.
pub fn decode_voxels(body: &mut BodyReader<'_>) -> VoxResult<Vec<Voxel>> {
    let count = body.read_count("voxel", VOXEL_BYTES)?;
    let records = body.take(count * VOXEL_BYTES)?;
    Ok(bytemuck::cast_slice::<u8, Voxel>(records).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::ChunkTag;

    fn xyzi_body(count: i32, records: &[[u8; 4]]) -> Vec<u8> {
        let mut bytes = count.to_le_bytes().to_vec();
        for record in records {
            bytes.extend_from_slice(record);
        }
        bytes
    }

    #[test]
    fn test_size_passes_values_through() {
        let mut bytes = Vec::new();
        for v in [3i32, 0, -2] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let mut body = BodyReader::new(&bytes, ChunkTag::SIZE, 0);
        let dims = Dimensions::decode(&mut body).unwrap();
        body.finish().unwrap();
        assert_eq!(dims, Dimensions::new(3, 0, -2));
        assert_eq!(dims.volume(), 0);
    }

    #[test]
    fn test_volume_does_not_overflow() {
        let dims = Dimensions::new(i32::MAX, 2, 2);
        assert_eq!(dims.volume(), i64::from(i32::MAX) * 4);
    }

    #[test]
    fn test_voxels_match_declared_count() {
        let bytes = xyzi_body(2, &[[0, 1, 2, 9], [0xff, 0x80, 5, 200]]);
        let mut body = BodyReader::new(&bytes, ChunkTag::XYZI, 0);
        let voxels = decode_voxels(&mut body).unwrap();
        body.finish().unwrap();

        assert_eq!(voxels.len(), 2);
        assert_eq!(voxels[0], Voxel::new(0, 1, 2, 9));
        assert_eq!(voxels[1].position(), [-1, -128, 5]);
        assert_eq!(voxels[1].grid_position(), [255, 128, 5]);
        assert_eq!(voxels[1].color_index, 200);
    }

    #[test]
    fn test_count_larger_than_body_is_malformed() {
        let bytes = xyzi_body(3, &[[0, 0, 0, 1], [1, 1, 1, 1]]);
        let mut body = BodyReader::new(&bytes, ChunkTag::XYZI, 0);
        assert!(decode_voxels(&mut body).unwrap_err().is_malformed());
    }

    #[test]
    fn test_count_smaller_than_body_leaves_bytes() {
        let bytes = xyzi_body(1, &[[0, 0, 0, 1], [1, 1, 1, 1]]);
        let mut body = BodyReader::new(&bytes, ChunkTag::XYZI, 0);
        assert_eq!(decode_voxels(&mut body).unwrap().len(), 1);
        assert!(body.finish().unwrap_err().is_malformed());
    }
}
