//! # Scene-Graph Chunks
//!
//! ```text
//! nTRN: int32 node id, DICT attributes, int32 child node id,
//!       int32 reserved id, int32 layer id, int32 frame count,
//!       DICT frame attributes x frame count
//! nGRP: int32 node id, DICT attributes, int32 child count,
//!       int32 child node id x child count
//! ```
//!
//! Nodes refer to each other only by ID. Resolving those references, and
//! deciding what to do about cycles, is left to the caller.

use serde::Serialize;

use crate::dict::AttributeDict;
use crate::error::VoxResult;
use crate::reader::BodyReader;

/// Identifier shared by all scene-graph nodes.
pub type NodeId = i32;

/// Frame attribute holding the translation, `"x y z"`.
pub const FRAME_TRANSLATION: &str = "_t";

/// Frame attribute holding the packed rotation byte.
pub const FRAME_ROTATION: &str = "_r";

/// Row-major 3x3 identity.
pub const IDENTITY_ROTATION: [[i8; 3]; 3] = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

/// Transform node (`nTRN`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformNode {
    /// Node attributes (`_name`, `_hidden`, ...).
    pub attributes: AttributeDict,
    /// The single node this transform applies to.
    pub child_id: NodeId,
    /// Reserved; -1 in files written by MagicaVoxel.
    pub reserved_id: i32,
    /// Layer this node belongs to.
    pub layer_id: i32,
    /// Per-frame attributes (`_r`, `_t`, `_f`).
    pub frames: Vec<AttributeDict>,
}

/// Group node (`nGRP`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupNode {
    /// Node attributes.
    pub attributes: AttributeDict,
    /// Child node IDs, in file order.
    pub children: Vec<NodeId>,
}

/// Decodes an `nTRN` chunk body into its node ID and node.
pub fn decode_transform(body: &mut BodyReader<'_>) -> VoxResult<(NodeId, TransformNode)> {
    let id = body.read_i32()?;
    let attributes = body.read_dict()?;
    let child_id = body.read_i32()?;
    let reserved_id = body.read_i32()?;
    let layer_id = body.read_i32()?;
    // An empty frame dictionary is four bytes.
    let frame_count = body.read_count("frame", 4)?;
    let mut frames = Vec::with_capacity(frame_count);
    for _ in 0..frame_count {
        frames.push(body.read_dict()?);
    }
    Ok((
        id,
        TransformNode {
            attributes,
            child_id,
            reserved_id,
            layer_id,
            frames,
        },
    ))
}

/// Decodes an `nGRP` chunk body into its node ID and node.
pub fn decode_group(body: &mut BodyReader<'_>) -> VoxResult<(NodeId, GroupNode)> {
    let id = body.read_i32()?;
    let attributes = body.read_dict()?;
    let child_count = body.read_count("child", 4)?;
    let mut children = Vec::with_capacity(child_count);
    for _ in 0..child_count {
        children.push(body.read_i32()?);
    }
    Ok((id, GroupNode { attributes, children }))
}

/// Translation and rotation described by one transform frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameTransform {
    /// Translation in voxels.
    pub translation: [i32; 3],
    /// Row-major signed permutation matrix.
    pub rotation: [[i8; 3]; 3],
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self {
            translation: [0; 3],
            rotation: IDENTITY_ROTATION,
        }
    }
}

impl FrameTransform {
    /// Interprets a frame's `_t` and `_r` attributes.
    ///
    /// A missing or unparseable attribute leaves that part at identity.
    #[must_use]
    pub fn from_frame(frame: &AttributeDict) -> Self {
        let translation = frame
            .get_str(FRAME_TRANSLATION)
            .and_then(|s| {
                let parsed = parse_translation(&s);
                if parsed.is_none() {
                    tracing::warn!("unrecognized translation {s:?}");
                }
                parsed
            })
            .unwrap_or([0; 3]);

        let rotation = frame
            .get_str(FRAME_ROTATION)
            .and_then(|s| {
                let parsed = s.trim().parse::<u8>().ok().and_then(unpack_rotation);
                if parsed.is_none() {
                    tracing::warn!("unrecognized rotation {s:?}");
                }
                parsed
            })
            .unwrap_or(IDENTITY_ROTATION);

        Self { translation, rotation }
    }
}

impl TransformNode {
    /// The node's name attribute, if present.
    #[must_use]
    pub fn name(&self) -> Option<std::borrow::Cow<'_, str>> {
        self.attributes.get_str("_name")
    }

    /// Transform of the first frame; identity if there are no frames.
    #[must_use]
    pub fn transform(&self) -> FrameTransform {
        self.frames
            .first()
            .map(FrameTransform::from_frame)
            .unwrap_or_default()
    }
}

fn parse_translation(s: &str) -> Option<[i32; 3]> {
    let mut parts = s.split_whitespace().map(str::parse::<i32>);
    let t = [parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?];
    parts.next().is_none().then_some(t)
}

/// Unpacks MagicaVoxel's rotation byte.
///
/// ```text
/// bit 0-1 : column of the non-zero entry in row one
/// bit 2-3 : column of the non-zero entry in row two
/// bit 4   : sign of row one   (0 positive, 1 negative)
/// bit 5   : sign of row two
/// bit 6   : sign of row three
/// ```
///
/// Row three takes the remaining column. Returns `None` when the two columns
/// collide or name a fourth column.
#[must_use]
pub fn unpack_rotation(packed: u8) -> Option<[[i8; 3]; 3]> {
    let first = usize::from(packed & 3);
    let second = usize::from((packed >> 2) & 3);
    if first > 2 || second > 2 || first == second {
        return None;
    }
    let third = 3 - first - second;

    let mut rows = [[0i8; 3]; 3];
    for (row, column) in [first, second, third].into_iter().enumerate() {
        rows[row][column] = if (packed >> (4 + row)) & 1 == 0 { 1 } else { -1 };
    }
    Some(rows)
}
