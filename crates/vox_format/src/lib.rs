//! # MagicaVoxel `.vox` Decoder
//!
//! Reads the chunked `.vox` format into a typed [`DecodedModel`].
//!
//! ## VOX Format Reference
//!
//! ```text
//! VOX File Structure:
//! ├── "VOX " (4 bytes) - Magic number
//! ├── Version (4 bytes) - File version (150 / 200)
//! └── MAIN Chunk
//!     ├── SIZE Chunk - Model dimensions
//!     ├── XYZI Chunk - Voxel data
//!     ├── RGBA Chunk - Palette (optional)
//!     ├── nTRN / nGRP Chunks - Scene graph (optional)
//!     └── anything else - skipped by declared length
//! ```
//!
//! ## Design Principles
//!
//! 1. **Exact framing** - every chunk moves the cursor by exactly its declared size
//! 2. **No partial results** - a decode returns a whole model or an error
//! 3. **Forward compatible** - unknown chunk tags are skipped, never rejected
//! 4. **Stateless** - decodes share nothing and can run in parallel
//!
//! ## Example
//!
//! ```rust,ignore
//! use vox_format::Vox;
//!
//! let vox = Vox::open("assets/models/sword.vox")?;
//! for i in 0..vox.count() {
//!     let color = vox.rgba(i);
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod decoder;
pub mod dict;
pub mod error;
pub mod geometry;
pub mod model;
pub mod palette;
pub mod reader;
pub mod scene;
pub mod tag;
pub mod vox;

pub use chunk::{read_chunk, Chunk, ChunkHeader};
pub use decoder::{decode, decode_bytes, decode_file, DecodeOptions, Decoder, VOX_MAGIC};
pub use dict::AttributeDict;
pub use error::{VoxError, VoxResult};
pub use geometry::{Dimensions, Voxel};
pub use model::{DecodedModel, Extents, Header, Model, ModelBuilder};
pub use palette::{Palette, Rgba, PALETTE_LEN};
pub use scene::{FrameTransform, GroupNode, NodeId, TransformNode};
pub use tag::ChunkTag;
pub use vox::Vox;
