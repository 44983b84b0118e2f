//! Four-byte chunk identifiers.

use std::fmt;

use serde::{Serialize, Serializer};

/// Four ASCII bytes naming a chunk kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkTag([u8; 4]);

impl ChunkTag {
    /// Root container.
    pub const MAIN: Self = Self(*b"MAIN");
    /// Model dimensions.
    pub const SIZE: Self = Self(*b"SIZE");
    /// Voxel positions and color indices.
    pub const XYZI: Self = Self(*b"XYZI");
    /// 256-entry palette.
    pub const RGBA: Self = Self(*b"RGBA");
    /// Scene-graph transform node.
    pub const NTRN: Self = Self(*b"nTRN");
    /// Scene-graph group node.
    pub const NGRP: Self = Self(*b"nGRP");
    /// Scene-graph shape node.
    pub const NSHP: Self = Self(*b"nSHP");
    /// Layer.
    pub const LAYR: Self = Self(*b"LAYR");
    /// Material.
    pub const MATL: Self = Self(*b"MATL");
    /// Render object settings.
    pub const ROBJ: Self = Self(*b"rOBJ");

    /// Tags this decoder recognizes but deliberately does not interpret.
    pub const IGNORED: [Self; 4] = [Self::NSHP, Self::LAYR, Self::MATL, Self::ROBJ];

    /// Wraps raw tag bytes.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Returns the raw tag bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> [u8; 4] {
        self.0
    }

    /// Returns true if the tag is one the decoder knows about, whether or not
    /// it interprets the body.
    #[must_use]
    pub fn is_known(self) -> bool {
        matches!(
            self,
            Self::MAIN | Self::SIZE | Self::XYZI | Self::RGBA | Self::NTRN | Self::NGRP
        ) || Self::IGNORED.contains(&self)
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkTag({self})")
    }
}

impl Serialize for ChunkTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_escapes_binary() {
        assert_eq!(ChunkTag::NTRN.to_string(), "nTRN");
        assert_eq!(ChunkTag::new([b'Z', 0, 0x7f, b'Z']).to_string(), "Z\\x00\\x7fZ");
        assert_eq!(format!("{:?}", ChunkTag::SIZE), "ChunkTag(SIZE)");
    }

    #[test]
    fn test_known_tags() {
        assert!(ChunkTag::MATL.is_known());
        assert!(ChunkTag::XYZI.is_known());
        assert!(!ChunkTag::new(*b"ZZZZ").is_known());
    }
}
