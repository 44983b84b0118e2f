//! Synthetic `.vox` byte streams for integration tests.

#![allow(dead_code)]

/// Encodes one chunk: tag, lengths, content, children.
pub fn chunk(tag: &[u8; 4], content: &[u8], children: &[u8]) -> Vec<u8> {
    let mut bytes = tag.to_vec();
    bytes.extend_from_slice(&(content.len() as i32).to_le_bytes());
    bytes.extend_from_slice(&(children.len() as i32).to_le_bytes());
    bytes.extend_from_slice(content);
    bytes.extend_from_slice(children);
    bytes
}

/// Encodes a dictionary.
pub fn dict(pairs: &[(&str, &str)]) -> Vec<u8> {
    let mut bytes = (pairs.len() as i32).to_le_bytes().to_vec();
    for (k, v) in pairs {
        bytes.extend_from_slice(&(k.len() as i32).to_le_bytes());
        bytes.extend_from_slice(k.as_bytes());
        bytes.extend_from_slice(&(v.len() as i32).to_le_bytes());
        bytes.extend_from_slice(v.as_bytes());
    }
    bytes
}

fn ints(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Builds a complete file chunk by chunk.
#[derive(Debug, Clone)]
pub struct VoxFileBuilder {
    magic: [u8; 4],
    version: i32,
    children: Vec<u8>,
}

impl Default for VoxFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VoxFileBuilder {
    pub fn new() -> Self {
        Self {
            magic: *b"VOX ",
            version: 150,
            children: Vec::new(),
        }
    }

    pub fn magic(mut self, magic: &[u8; 4]) -> Self {
        self.magic = *magic;
        self
    }

    /// Appends bytes under MAIN verbatim.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.children.extend_from_slice(bytes);
        self
    }

    pub fn chunk(self, tag: &[u8; 4], content: &[u8]) -> Self {
        self.raw(&chunk(tag, content, &[]))
    }

    pub fn size(self, x: i32, y: i32, z: i32) -> Self {
        self.chunk(b"SIZE", &ints(&[x, y, z]))
    }

    pub fn xyzi(self, voxels: &[[u8; 4]]) -> Self {
        let mut content = ints(&[voxels.len() as i32]);
        for v in voxels {
            content.extend_from_slice(v);
        }
        self.chunk(b"XYZI", &content)
    }

    pub fn rgba(self, palette: &[[u8; 4]; 256]) -> Self {
        let content: Vec<u8> = palette.iter().flatten().copied().collect();
        self.chunk(b"RGBA", &content)
    }

    pub fn ntrn(self, id: i32, name: &str, child: i32, frames: &[&[(&str, &str)]]) -> Self {
        let mut content = ints(&[id]);
        content.extend(dict(&[("_name", name)]));
        content.extend(ints(&[child, -1, 0, frames.len() as i32]));
        for frame in frames {
            content.extend(dict(frame));
        }
        self.chunk(b"nTRN", &content)
    }

    pub fn ngrp(self, id: i32, children: &[i32]) -> Self {
        let mut content = ints(&[id]);
        content.extend(dict(&[]));
        content.extend(ints(&[children.len() as i32]));
        content.extend(ints(children));
        self.chunk(b"nGRP", &content)
    }

    /// Bytes under MAIN so far.
    pub fn children_len(&self) -> usize {
        self.children.len()
    }

    /// Encodes the file with MAIN declaring exactly the appended bytes.
    pub fn build(&self) -> Vec<u8> {
        self.build_declaring(self.children.len() as i32)
    }

    /// Encodes the file with MAIN declaring `children_length` bytes.
    pub fn build_declaring(&self, children_length: i32) -> Vec<u8> {
        let mut bytes = self.magic.to_vec();
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(b"MAIN");
        bytes.extend_from_slice(&0i32.to_le_bytes());
        bytes.extend_from_slice(&children_length.to_le_bytes());
        bytes.extend_from_slice(&self.children);
        bytes
    }
}

/// Palette whose first entry is opaque red and the rest black.
pub fn red_first_palette() -> [[u8; 4]; 256] {
    let mut palette = [[0, 0, 0, 255]; 256];
    palette[0] = [255, 0, 0, 255];
    palette
}

/// Palette where entry `k` is `[k, 255 - k, k / 2, 255]`.
pub fn gradient_palette() -> [[u8; 4]; 256] {
    let mut palette = [[0u8; 4]; 256];
    for (k, entry) in palette.iter_mut().enumerate() {
        let k = k as u8;
        *entry = [k, 255 - k, k / 2, 255];
    }
    palette
}

/// The minimal end-to-end file: SIZE(2,2,2), one voxel, red first entry.
pub fn minimal_file() -> Vec<u8> {
    VoxFileBuilder::new()
        .size(2, 2, 2)
        .xyzi(&[[0, 0, 0, 1]])
        .rgba(&red_first_palette())
        .build()
}
