//! # Chunk Framing & Dispatch
//!
//! ```text
//! 4 bytes : tag
//! int32   : content length  (N)
//! int32   : children length (M)
//! N bytes : content
//! M bytes : children chunks
//! ```
//!
//! Every chunk, understood or not, leaves the cursor exactly
//! `12 + N + M` bytes past where its header started.

use std::io::Read;

use serde::Serialize;

use crate::error::{VoxError, VoxResult};
use crate::geometry::{decode_voxels, Dimensions, Voxel};
use crate::palette::Palette;
use crate::reader::{BodyReader, StreamReader};
use crate::scene::{decode_group, decode_transform, GroupNode, NodeId, TransformNode};
use crate::tag::ChunkTag;

/// Byte size of a chunk header.
pub const HEADER_BYTES: u64 = 12;

/// A chunk header as read from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkHeader {
    /// Chunk kind.
    pub tag: ChunkTag,
    /// Bytes of this chunk's own payload.
    pub content_length: u32,
    /// Bytes of nested child chunks following the payload.
    pub children_length: u32,
    /// Absolute offset of the header.
    pub offset: u64,
}

impl ChunkHeader {
    /// Reads a header at the stream's current position.
    ///
    /// Negative lengths are rejected here so that everything downstream can
    /// work with unsigned sizes.
    pub fn read<R: Read>(reader: &mut StreamReader<R>) -> VoxResult<Self> {
        let offset = reader.position();
        let tag = reader.read_tag()?;
        let content = reader.read_i32()?;
        let children = reader.read_i32()?;

        let length = |value: i32, what: &str| {
            u32::try_from(value).map_err(|_| {
                VoxError::malformed(tag, offset, format!("negative {what} length {value}"))
            })
        };
        Ok(Self {
            tag,
            content_length: length(content, "content")?,
            children_length: length(children, "children")?,
            offset,
        })
    }

    /// Header plus content plus children.
    #[inline]
    #[must_use]
    pub fn total_size(&self) -> u64 {
        HEADER_BYTES + u64::from(self.content_length) + u64::from(self.children_length)
    }

    /// Offset of the first byte after this chunk.
    #[inline]
    #[must_use]
    pub fn end(&self) -> u64 {
        self.offset + self.total_size()
    }
}

/// One decoded chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    /// `SIZE`.
    Size(Dimensions),
    /// `XYZI`.
    Voxels(Vec<Voxel>),
    /// `RGBA`.
    Palette(Palette),
    /// `nTRN`.
    Transform(NodeId, TransformNode),
    /// `nGRP`.
    Group(NodeId, GroupNode),
    /// Any chunk whose body was skipped by its declared length.
    Skipped(ChunkHeader),
}

type BodyDecoder = fn(&mut BodyReader<'_>) -> VoxResult<Chunk>;

fn size_chunk(body: &mut BodyReader<'_>) -> VoxResult<Chunk> {
    Dimensions::decode(body).map(Chunk::Size)
}

fn voxels_chunk(body: &mut BodyReader<'_>) -> VoxResult<Chunk> {
    decode_voxels(body).map(Chunk::Voxels)
}

fn palette_chunk(body: &mut BodyReader<'_>) -> VoxResult<Chunk> {
    Palette::decode(body).map(Chunk::Palette)
}

fn transform_chunk(body: &mut BodyReader<'_>) -> VoxResult<Chunk> {
    decode_transform(body).map(|(id, node)| Chunk::Transform(id, node))
}

fn group_chunk(body: &mut BodyReader<'_>) -> VoxResult<Chunk> {
    decode_group(body).map(|(id, node)| Chunk::Group(id, node))
}

fn skip_chunk<R: Read>(reader: &mut StreamReader<R>, header: ChunkHeader) -> VoxResult<Chunk> {
    if header.tag.is_known() {
        tracing::trace!("skipping {} chunk at offset {}", header.tag, header.offset);
    } else {
        tracing::debug!(
            "skipping unknown {} chunk at offset {} ({} byte(s))",
            header.tag,
            header.offset,
            header.total_size()
        );
    }
    reader.skip(header.total_size() - HEADER_BYTES)?;
    Ok(Chunk::Skipped(header))
}

/// Reads one chunk from `reader`, which must not extend past `limit`.
///
/// The chunk's declared size is checked against `limit` before its body is
/// touched; understood bodies must decode to exactly their content length.
pub fn read_chunk<R: Read>(reader: &mut StreamReader<R>, limit: u64) -> VoxResult<Chunk> {
    let header = ChunkHeader::read(reader)?;
    if header.end() > limit {
        return Err(VoxError::malformed(
            header.tag,
            header.offset,
            format!(
                "declares {} byte(s), container ends {} byte(s) after its start",
                header.total_size(),
                limit.saturating_sub(header.offset)
            ),
        ));
    }

    let decode_body: BodyDecoder = match header.tag {
        ChunkTag::SIZE => size_chunk,
        ChunkTag::XYZI => voxels_chunk,
        ChunkTag::RGBA => palette_chunk,
        ChunkTag::NTRN => transform_chunk,
        ChunkTag::NGRP => group_chunk,
        _ => return skip_chunk(reader, header),
    };

    let bytes = reader.read_body(u64::from(header.content_length))?;
    let mut body = BodyReader::new(&bytes, header.tag, header.offset);
    let chunk = decode_body(&mut body)?;
    body.finish()?;
    if header.children_length > 0 {
        tracing::debug!(
            "ignoring {} byte(s) of children under {} chunk at offset {}",
            header.children_length,
            header.tag,
            header.offset
        );
        reader.skip(u64::from(header.children_length))?;
    }
    tracing::trace!("decoded {} chunk at offset {}", header.tag, header.offset);
    Ok(chunk)
}
