//! # Decoder Error Types
//!
//! Every failure a decode call can report. None of them is recoverable for
//! the call that raised it: the decoder returns the error and drops whatever
//! it had assembled so far.

use std::io;

use thiserror::Error;

use crate::tag::ChunkTag;

/// Errors that can occur while decoding a `.vox` source.
#[derive(Error, Debug)]
pub enum VoxError {
    /// The source itself is unusable: empty buffer, empty or mis-named path.
    ///
    /// Detected before any byte is decoded.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The stream ended before a read could be satisfied.
    #[error("truncated input: needed {needed} more byte(s) at offset {offset}")]
    TruncatedInput {
        /// Absolute stream offset at which the read started.
        offset: u64,
        /// Bytes still missing when the stream ran dry.
        needed: u64,
    },

    /// A chunk's declared lengths disagree with its contents or its container.
    #[error("malformed {tag} chunk at offset {offset}: {reason}")]
    MalformedChunk {
        /// Tag of the offending chunk.
        tag: ChunkTag,
        /// Absolute offset of the chunk header.
        offset: u64,
        /// What did not line up.
        reason: String,
    },

    /// The file does not start with the `"VOX "` magic.
    #[error("not a .vox file: magic {}", ChunkTag::new(*.0))]
    BadMagic([u8; 4]),

    /// Underlying I/O failure other than end of stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl VoxError {
    /// Builds a [`VoxError::MalformedChunk`].
    pub(crate) fn malformed(tag: ChunkTag, offset: u64, reason: impl Into<String>) -> Self {
        Self::MalformedChunk {
            tag,
            offset,
            reason: reason.into(),
        }
    }

    /// Returns true for [`VoxError::TruncatedInput`].
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }

    /// Returns true for [`VoxError::MalformedChunk`].
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedChunk { .. })
    }
}

/// Result type for decoder operations.
pub type VoxResult<T> = Result<T, VoxError>;
