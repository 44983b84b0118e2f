//! # Decoder
//!
//! Top-level driver.
//!
//! ```text
//! "VOX "           magic
//! int32            version
//! MAIN header      content length N, children length M
//! N bytes          MAIN content (skipped)
//! M bytes          child chunks, read until exactly M bytes are consumed
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vox_format::decode_file;
//!
//! let model = decode_file("assets/models/sword.vox")?;
//! println!("{} voxels", model.voxels().len());
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::chunk::{read_chunk, ChunkHeader, HEADER_BYTES};
use crate::error::{VoxError, VoxResult};
use crate::model::{DecodedModel, Extents, Header, ModelBuilder};
use crate::reader::StreamReader;
use crate::tag::ChunkTag;

/// Magic number at the start of every `.vox` file.
pub const VOX_MAGIC: [u8; 4] = *b"VOX ";

/// Versions MagicaVoxel is known to write.
pub const KNOWN_VERSIONS: [i32; 2] = [150, 200];

/// Decode-time switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Reject sources whose first four bytes are not `"VOX "`.
    pub verify_magic: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { verify_magic: true }
    }
}

/// Reusable decoder configuration.
///
/// Holds no state between calls; every decode starts from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    /// Creates a decoder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with the given options.
    #[must_use]
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Decodes a complete model from `source`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the source yields no bytes at all,
    /// `TruncatedInput` if the stream ends early, `MalformedChunk` if a
    /// length field disagrees with the data, `BadMagic` if the magic check is
    /// enabled and fails, `Io` for other read failures.
    pub fn decode<R: Read>(&self, source: R) -> VoxResult<DecodedModel> {
        let mut reader = StreamReader::new(source);

        let header = self.read_header(&mut reader)?;
        let main = ChunkHeader::read(&mut reader)?;
        if main.tag != ChunkTag::MAIN {
            return Err(VoxError::malformed(
                main.tag,
                main.offset,
                "expected MAIN as the root chunk",
            ));
        }
        reader.skip(u64::from(main.content_length))?;

        let mut builder = ModelBuilder::new(
            header,
            Extents {
                content_length: main.content_length,
                children_length: main.children_length,
            },
        );

        let end = main.end();
        while reader.position() < end {
            let remaining = end - reader.position();
            if remaining < HEADER_BYTES {
                return Err(VoxError::malformed(
                    ChunkTag::MAIN,
                    main.offset,
                    format!("{remaining} trailing byte(s) cannot hold a chunk header"),
                ));
            }
            builder.push(read_chunk(&mut reader, end)?);
        }

        let model = builder.finish();
        tracing::debug!(
            "decoded {} model(s), {} transform node(s), {} group node(s), {} skipped chunk(s)",
            model.models.len(),
            model.transform_nodes.len(),
            model.group_nodes.len(),
            model.skipped.len()
        );
        Ok(model)
    }

    /// Decodes an in-memory buffer.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty buffer, otherwise as [`Decoder::decode`].
    pub fn decode_bytes(&self, bytes: &[u8]) -> VoxResult<DecodedModel> {
        if bytes.is_empty() {
            return Err(VoxError::InvalidInput("empty source".to_string()));
        }
        self.decode(bytes)
    }

    /// Opens and decodes a file. The handle is closed before this returns,
    /// whether decoding succeeded or not.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty path or an empty file, `Io` if the file
    /// cannot be opened, otherwise as [`Decoder::decode`].
    pub fn decode_file(&self, path: impl AsRef<Path>) -> VoxResult<DecodedModel> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(VoxError::InvalidInput("empty path".to_string()));
        }
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Err(VoxError::InvalidInput(format!(
                "{} is empty",
                path.display()
            )));
        }
        self.decode(BufReader::new(file))
    }

    fn read_header<R: Read>(&self, reader: &mut StreamReader<R>) -> VoxResult<Header> {
        let magic = match reader.read_array::<4>() {
            // Nothing at all, as opposed to a stream cut short.
            Err(VoxError::TruncatedInput {
                offset: 0,
                needed: 4,
            }) => return Err(VoxError::InvalidInput("empty source".to_string())),
            other => other?,
        };
        if self.options.verify_magic && magic != VOX_MAGIC {
            return Err(VoxError::BadMagic(magic));
        }
        let version = reader.read_i32()?;
        if !KNOWN_VERSIONS.contains(&version) {
            tracing::debug!("unfamiliar .vox version {version}; decoding anyway");
        }
        Ok(Header {
            magic: ChunkTag::new(magic),
            version,
        })
    }
}

/// Decodes a model from any byte source with default options.
///
/// # Errors
///
/// See [`Decoder::decode`].
pub fn decode<R: Read>(source: R) -> VoxResult<DecodedModel> {
    Decoder::new().decode(source)
}

/// Decodes an in-memory buffer with default options.
///
/// # Errors
///
/// See [`Decoder::decode_bytes`].
pub fn decode_bytes(bytes: &[u8]) -> VoxResult<DecodedModel> {
    Decoder::new().decode_bytes(bytes)
}

/// Opens and decodes a file with default options.
///
/// # Errors
///
/// See [`Decoder::decode_file`].
pub fn decode_file(path: impl AsRef<Path>) -> VoxResult<DecodedModel> {
    Decoder::new().decode_file(path)
}
