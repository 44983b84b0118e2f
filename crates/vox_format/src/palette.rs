//! # Palette
//!
//! The `RGBA` chunk stores 256 colors. Voxel color index `i` (1..=255) names
//! palette entry `i - 1`; index 0 means "no voxel" and never resolves. The
//! off-by-one is part of the file format.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Serializer};

use crate::error::VoxResult;
use crate::reader::BodyReader;

/// Number of entries in every palette.
pub const PALETTE_LEN: usize = 256;

/// Byte size of an `RGBA` chunk body.
pub const PALETTE_BYTES: usize = PALETTE_LEN * 4;

/// MagicaVoxel's built-in palette, packed `0xAABBGGRR`, indexed by voxel color
/// index (entry 0 is the unused slot).
static DEFAULT_PALETTE: [u32; PALETTE_LEN] = [
    0x00000000, 0xffffffff, 0xffccffff, 0xff99ffff, 0xff66ffff, 0xff33ffff, 0xff00ffff, 0xffffccff,
    0xffccccff, 0xff99ccff, 0xff66ccff, 0xff33ccff, 0xff00ccff, 0xffff99ff, 0xffcc99ff, 0xff9999ff,
    0xff6699ff, 0xff3399ff, 0xff0099ff, 0xffff66ff, 0xffcc66ff, 0xff9966ff, 0xff6666ff, 0xff3366ff,
    0xff0066ff, 0xffff33ff, 0xffcc33ff, 0xff9933ff, 0xff6633ff, 0xff3333ff, 0xff0033ff, 0xffff00ff,
    0xffcc00ff, 0xff9900ff, 0xff6600ff, 0xff3300ff, 0xff0000ff, 0xffffffcc, 0xffccffcc, 0xff99ffcc,
    0xff66ffcc, 0xff33ffcc, 0xff00ffcc, 0xffffcccc, 0xffcccccc, 0xff99cccc, 0xff66cccc, 0xff33cccc,
    0xff00cccc, 0xffff99cc, 0xffcc99cc, 0xff9999cc, 0xff6699cc, 0xff3399cc, 0xff0099cc, 0xffff66cc,
    0xffcc66cc, 0xff9966cc, 0xff6666cc, 0xff3366cc, 0xff0066cc, 0xffff33cc, 0xffcc33cc, 0xff9933cc,
    0xff6633cc, 0xff3333cc, 0xff0033cc, 0xffff00cc, 0xffcc00cc, 0xff9900cc, 0xff6600cc, 0xff3300cc,
    0xff0000cc, 0xffffff99, 0xffccff99, 0xff99ff99, 0xff66ff99, 0xff33ff99, 0xff00ff99, 0xffffcc99,
    0xffcccc99, 0xff99cc99, 0xff66cc99, 0xff33cc99, 0xff00cc99, 0xffff9999, 0xffcc9999, 0xff999999,
    0xff669999, 0xff339999, 0xff009999, 0xffff6699, 0xffcc6699, 0xff996699, 0xff666699, 0xff336699,
    0xff006699, 0xffff3399, 0xffcc3399, 0xff993399, 0xff663399, 0xff333399, 0xff003399, 0xffff0099,
    0xffcc0099, 0xff990099, 0xff660099, 0xff330099, 0xff000099, 0xffffff66, 0xffccff66, 0xff99ff66,
    0xff66ff66, 0xff33ff66, 0xff00ff66, 0xffffcc66, 0xffcccc66, 0xff99cc66, 0xff66cc66, 0xff33cc66,
    0xff00cc66, 0xffff9966, 0xffcc9966, 0xff999966, 0xff669966, 0xff339966, 0xff009966, 0xffff6666,
    0xffcc6666, 0xff996666, 0xff666666, 0xff336666, 0xff006666, 0xffff3366, 0xffcc3366, 0xff993366,
    0xff663366, 0xff333366, 0xff003366, 0xffff0066, 0xffcc0066, 0xff990066, 0xff660066, 0xff330066,
    0xff000066, 0xffffff33, 0xffccff33, 0xff99ff33, 0xff66ff33, 0xff33ff33, 0xff00ff33, 0xffffcc33,
    0xffcccc33, 0xff99cc33, 0xff66cc33, 0xff33cc33, 0xff00cc33, 0xffff9933, 0xffcc9933, 0xff999933,
    0xff669933, 0xff339933, 0xff009933, 0xffff6633, 0xffcc6633, 0xff996633, 0xff666633, 0xff336633,
    0xff006633, 0xffff3333, 0xffcc3333, 0xff993333, 0xff663333, 0xff333333, 0xff003333, 0xffff0033,
    0xffcc0033, 0xff990033, 0xff660033, 0xff330033, 0xff000033, 0xffffff00, 0xffccff00, 0xff99ff00,
    0xff66ff00, 0xff33ff00, 0xff00ff00, 0xffffcc00, 0xffcccc00, 0xff99cc00, 0xff66cc00, 0xff33cc00,
    0xff00cc00, 0xffff9900, 0xffcc9900, 0xff999900, 0xff669900, 0xff339900, 0xff009900, 0xffff6600,
    0xffcc6600, 0xff996600, 0xff666600, 0xff336600, 0xff006600, 0xffff3300, 0xffcc3300, 0xff993300,
    0xff663300, 0xff333300, 0xff003300, 0xffff0000, 0xffcc0000, 0xff990000, 0xff660000, 0xff330000,
    0xff0000ee, 0xff0000dd, 0xff0000bb, 0xff0000aa, 0xff000088, 0xff000077, 0xff000055, 0xff000044,
    0xff000022, 0xff000011, 0xff00ee00, 0xff00dd00, 0xff00bb00, 0xff00aa00, 0xff008800, 0xff007700,
    0xff005500, 0xff004400, 0xff002200, 0xff001100, 0xffee0000, 0xffdd0000, 0xffbb0000, 0xffaa0000,
    0xff880000, 0xff770000, 0xff550000, 0xff440000, 0xff220000, 0xff110000, 0xffeeeeee, 0xffdddddd,
    0xffbbbbbb, 0xffaaaaaa, 0xff888888, 0xff777777, 0xff555555, 0xff444444, 0xff222222, 0xff111111,
];

/// One palette color.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255).
    pub a: u8,
}

impl Rgba {
    /// Creates a color from its components.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates from packed `0xAABBGGRR`.
    #[inline]
    #[must_use]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: (packed & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: ((packed >> 16) & 0xFF) as u8,
            a: ((packed >> 24) & 0xFF) as u8,
        }
    }

    /// Returns the components as `[r, g, b, a]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

/// A full 256-entry palette in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Box<[Rgba; PALETTE_LEN]>,
}

impl Default for Palette {
    /// MagicaVoxel's built-in palette, laid out the way an `RGBA` chunk
    /// would store it.
    fn default() -> Self {
        let mut colors = Box::new([Rgba::default(); PALETTE_LEN]);
        for (slot, color) in colors.iter_mut().enumerate() {
            *color = Rgba::from_packed(DEFAULT_PALETTE[(slot + 1) % PALETTE_LEN]);
        }
        Self { colors }
    }
}

impl Palette {
    /// Wraps 256 colors in file order.
    #[must_use]
    pub fn new(colors: [Rgba; PALETTE_LEN]) -> Self {
        Self {
            colors: Box::new(colors),
        }
    }

    /// Decodes an `RGBA` chunk body: always 256 entries of four bytes.
    pub fn decode(body: &mut BodyReader<'_>) -> VoxResult<Self> {
        let bytes = body.take(PALETTE_BYTES)?;
        let mut colors = Box::new([Rgba::default(); PALETTE_LEN]);
        colors.copy_from_slice(bytemuck::cast_slice(bytes));
        Ok(Self { colors })
    }

    /// All entries in file order.
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &[Rgba; PALETTE_LEN] {
        &self.colors
    }

    /// Number of entries. Always 256.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for symmetry with [`Palette::len`].
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Entry at file position `slot` (0..=255).
    #[inline]
    #[must_use]
    pub fn entry(&self, slot: u8) -> Rgba {
        self.colors[usize::from(slot)]
    }

    /// Resolves a voxel color index. Index `i` maps to entry `i - 1`;
    /// index 0 is the empty slot and resolves to nothing.
    #[inline]
    #[must_use]
    pub fn resolve(&self, color_index: u8) -> Option<Rgba> {
        color_index.checked_sub(1).map(|slot| self.entry(slot))
    }
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.colors.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::ChunkTag;

    #[test]
    fn test_rgba_from_packed() {
        let color = Rgba::from_packed(0xFF11_2233);
        assert_eq!(color, Rgba::new(0x33, 0x22, 0x11, 0xFF));
    }

    #[test]
    fn test_default_palette_file_order() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 256);
        // Color index 1 is white, stored in the first slot.
        assert_eq!(palette.resolve(1), Some(Rgba::new(255, 255, 255, 255)));
        // The unused index wraps to the last slot.
        assert_eq!(palette.entry(255), Rgba::default());
        assert_eq!(palette.resolve(0), None);
    }

    #[test]
    fn test_decode_is_off_by_one() {
        let mut bytes = vec![0u8; PALETTE_BYTES];
        bytes[..4].copy_from_slice(&[255, 0, 0, 255]);
        bytes[4 * 254..4 * 255].copy_from_slice(&[1, 2, 3, 4]);

        let mut body = BodyReader::new(&bytes, ChunkTag::RGBA, 0);
        let palette = Palette::decode(&mut body).unwrap();
        body.finish().unwrap();

        assert_eq!(palette.resolve(1), Some(Rgba::new(255, 0, 0, 255)));
        assert_eq!(palette.resolve(255), Some(Rgba::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_short_body_is_malformed() {
        let bytes = vec![0u8; PALETTE_BYTES - 4];
        let mut body = BodyReader::new(&bytes, ChunkTag::RGBA, 0);
        assert!(Palette::decode(&mut body).unwrap_err().is_malformed());
    }
}
