//! # Primitive Readers
//!
//! Two cursors with the same contract: a read consumes exactly the bytes it
//! asks for and advances by that many, or it fails. There are no short reads.
//!
//! - [`StreamReader`] walks the byte source. Running out of bytes there means
//!   the file ended early, reported as [`VoxError::TruncatedInput`].
//! - [`BodyReader`] walks one chunk body that has already been pulled out of
//!   the stream. Running out of bytes there means the chunk's declared content
//!   length is wrong, reported as [`VoxError::MalformedChunk`].

use std::io::{self, Read};

use crate::dict::AttributeDict;
use crate::error::{VoxError, VoxResult};
use crate::tag::ChunkTag;

/// Sequential reader over the raw byte source.
#[derive(Debug)]
pub struct StreamReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> StreamReader<R> {
    /// Wraps a byte source positioned at its first byte.
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Absolute offset of the next byte to be read.
    #[inline]
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Releases the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Fills `buf` completely or fails with `TruncatedInput`.
    fn fill(&mut self, buf: &mut [u8]) -> VoxResult<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(VoxError::TruncatedInput {
                        offset: self.position,
                        needed: (buf.len() - filled) as u64,
                    });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.position += buf.len() as u64;
        Ok(())
    }

    /// Reads exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> VoxResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Reads a little-endian i32.
    pub fn read_i32(&mut self) -> VoxResult<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Reads an unsigned byte.
    pub fn read_u8(&mut self) -> VoxResult<u8> {
        self.read_array::<1>().map(|[b]| b)
    }

    /// Reads a signed byte.
    pub fn read_i8(&mut self) -> VoxResult<i8> {
        self.read_array().map(i8::from_le_bytes)
    }

    /// Reads a 4-byte chunk tag (or magic).
    pub fn read_tag(&mut self) -> VoxResult<ChunkTag> {
        self.read_array().map(ChunkTag::new)
    }

    /// Reads exactly `len` bytes into an owned buffer.
    ///
    /// The buffer grows with the bytes actually delivered, so a lying length
    /// field cannot force a large allocation up front.
    pub fn read_body(&mut self, len: u64) -> VoxResult<Vec<u8>> {
        let mut body = Vec::new();
        let read = read_up_to(&mut self.inner, len, &mut body)?;
        self.position += read;
        if read < len {
            return Err(VoxError::TruncatedInput {
                offset: self.position,
                needed: len - read,
            });
        }
        Ok(body)
    }

    /// Discards exactly `len` bytes.
    pub fn skip(&mut self, len: u64) -> VoxResult<()> {
        let skipped = io::copy(&mut (&mut self.inner).take(len), &mut io::sink())?;
        self.position += skipped;
        if skipped < len {
            return Err(VoxError::TruncatedInput {
                offset: self.position,
                needed: len - skipped,
            });
        }
        Ok(())
    }
}

fn read_up_to<R: Read>(inner: &mut R, len: u64, out: &mut Vec<u8>) -> io::Result<u64> {
    let read = inner.take(len).read_to_end(out)?;
    Ok(read as u64)
}

/// Bounded reader over a single chunk body.
#[derive(Debug)]
pub struct BodyReader<'a> {
    body: &'a [u8],
    cursor: usize,
    tag: ChunkTag,
    offset: u64,
}

impl<'a> BodyReader<'a> {
    /// Creates a reader over the body of the `tag` chunk whose header starts
    /// at `offset`.
    #[must_use]
    pub fn new(body: &'a [u8], tag: ChunkTag, offset: u64) -> Self {
        Self {
            body,
            cursor: 0,
            tag,
            offset,
        }
    }

    /// Bytes not yet consumed.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.body.len() - self.cursor
    }

    /// Error for this chunk.
    pub fn malformed(&self, reason: impl Into<String>) -> VoxError {
        VoxError::malformed(self.tag, self.offset, reason)
    }

    /// Takes the next `n` bytes.
    pub fn take(&mut self, n: usize) -> VoxResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.malformed(format!(
                "content length {} too short: needed {n} byte(s) at body offset {}, {} left",
                self.body.len(),
                self.cursor,
                self.remaining()
            )));
        }
        let bytes = &self.body[self.cursor..self.cursor + n];
        self.cursor += n;
        Ok(bytes)
    }

    /// Reads exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> VoxResult<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    /// Reads a little-endian i32.
    pub fn read_i32(&mut self) -> VoxResult<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Reads an unsigned byte.
    pub fn read_u8(&mut self) -> VoxResult<u8> {
        self.read_array::<1>().map(|[b]| b)
    }

    /// Reads a signed byte.
    pub fn read_i8(&mut self) -> VoxResult<i8> {
        self.read_array().map(i8::from_le_bytes)
    }

    /// Reads an i32 element count and checks that `count` elements of at
    /// least `min_size` bytes each can still fit in the body.
    pub fn read_count(&mut self, what: &str, min_size: usize) -> VoxResult<usize> {
        let raw = self.read_i32()?;
        let count = usize::try_from(raw)
            .map_err(|_| self.malformed(format!("negative {what} count {raw}")))?;
        let needed = count.saturating_mul(min_size);
        if needed > self.remaining() {
            return Err(self.malformed(format!(
                "{what} count {count} needs at least {needed} byte(s), {} left",
                self.remaining()
            )));
        }
        Ok(count)
    }

    /// Reads an i32-length-prefixed byte string.
    pub fn read_string(&mut self) -> VoxResult<Vec<u8>> {
        let len = self.read_count("string byte", 1)?;
        self.take(len).map(<[u8]>::to_vec)
    }

    /// Reads a dictionary: an i32 pair count, then that many length-prefixed
    /// key/value pairs.
    pub fn read_dict(&mut self) -> VoxResult<AttributeDict> {
        // Smallest pair is two empty strings: two length prefixes.
        let count = self.read_count("dictionary pair", 8)?;
        let mut dict = AttributeDict::new();
        for _ in 0..count {
            let key = self.read_string()?;
            let value = self.read_string()?;
            dict.insert(key, value);
        }
        Ok(dict)
    }

    /// Checks that the whole body was consumed.
    pub fn finish(self) -> VoxResult<()> {
        if self.remaining() != 0 {
            return Err(self.malformed(format!(
                "content length {} but body decoded from {} byte(s)",
                self.body.len(),
                self.cursor
            )));
        }
        Ok(())
    }
}
