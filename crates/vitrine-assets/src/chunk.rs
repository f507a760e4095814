//! Walks the chunk records that follow the GLB header.
//!
//! The walk is a small state machine: a JSON chunk is mandatory and must come
//! first, a BIN chunk may follow it, and anything after that is an extension
//! chunk this crate does not interpret.

use tracing::{debug, warn};

use crate::cursor::ByteCursor;
use crate::error::GlbError;
use crate::header::ContainerHeader;

/// Chunk type tag of the JSON chunk ("JSON" little-endian).
pub const CHUNK_JSON: u32 = 0x4E4F_4A53;
/// Chunk type tag of the binary chunk ("BIN\0" little-endian).
pub const CHUNK_BIN: u32 = 0x004E_4942;

const CHUNK_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkType {
    Json,
    Bin,
    Other(u32),
}

impl ChunkType {
    pub fn from_tag(tag: u32) -> Self {
        match tag {
            CHUNK_JSON => ChunkType::Json,
            CHUNK_BIN => ChunkType::Bin,
            other => ChunkType::Other(other),
        }
    }
}

/// A chunk record whose payload borrows from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub length: u32,
    pub chunk_type: ChunkType,
    pub payload: &'a [u8],
}

/// Position of the reader in the chunk sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    ExpectJson,
    ExpectBinOrEnd,
    Done,
}

/// Iterator over the JSON chunk and the optional BIN chunk of an asset.
///
/// Yields at most two chunks. After an error the reader is finished.
pub struct ChunkReader<'a> {
    cursor: ByteCursor<'a>,
    offset: usize,
    state: ChunkState,
    strict_padding: bool,
}

impl<'a> ChunkReader<'a> {
    /// Start reading chunks at `offset` within `asset`.
    ///
    /// `asset` should already be cut to the length declared in the header.
    pub fn new(asset: &'a [u8], offset: usize) -> Self {
        Self {
            cursor: ByteCursor::new(asset),
            offset,
            state: ChunkState::ExpectJson,
            strict_padding: false,
        }
    }

    /// Reject chunk lengths that are not a multiple of 4 instead of warning.
    pub fn with_strict_padding(mut self, strict: bool) -> Self {
        self.strict_padding = strict;
        self
    }

    pub fn state(&self) -> ChunkState {
        self.state
    }

    fn remaining(&self) -> usize {
        self.cursor.len().saturating_sub(self.offset)
    }

    /// Read the `(length, type tag)` record header at the current offset.
    fn read_record(&self) -> Result<(u32, u32), GlbError> {
        let truncated = |_| GlbError::TruncatedChunk {
            offset: self.offset,
            declared: CHUNK_HEADER_LEN as u64,
            remaining: self.remaining(),
        };
        let length = self.cursor.read_u32_le(self.offset).map_err(truncated)?;
        let tag = self.cursor.read_u32_le(self.offset + 4).map_err(truncated)?;
        Ok((length, tag))
    }

    /// Take the payload of a record whose header was read at the current
    /// offset, and move past it.
    fn take_chunk(&mut self, length: u32, tag: u32) -> Result<Chunk<'a>, GlbError> {
        let start = self.offset + CHUNK_HEADER_LEN;
        let payload = self
            .cursor
            .slice(start, length as usize)
            .map_err(|_| GlbError::TruncatedChunk {
                offset: self.offset,
                declared: u64::from(length),
                remaining: self.remaining().saturating_sub(CHUNK_HEADER_LEN),
            })?;

        if length % 4 != 0 {
            if self.strict_padding {
                return Err(GlbError::UnalignedChunk {
                    offset: self.offset,
                    length,
                });
            }
            warn!(
                "chunk at offset {} has unpadded length {}",
                self.offset, length
            );
        }

        self.offset = start + payload.len();
        Ok(Chunk {
            length,
            chunk_type: ChunkType::from_tag(tag),
            payload,
        })
    }

    fn step(&mut self) -> Result<Option<Chunk<'a>>, GlbError> {
        match self.state {
            ChunkState::ExpectJson => {
                if self.remaining() == 0 {
                    return Err(GlbError::MissingJsonChunk);
                }
                let (length, tag) = self.read_record()?;
                if tag != CHUNK_JSON {
                    return Err(GlbError::MissingJsonChunk);
                }
                let chunk = self.take_chunk(length, tag)?;
                self.state = ChunkState::ExpectBinOrEnd;
                Ok(Some(chunk))
            }
            ChunkState::ExpectBinOrEnd => {
                if self.remaining() == 0 {
                    self.state = ChunkState::Done;
                    return Ok(None);
                }
                let (length, tag) = self.read_record()?;
                if tag != CHUNK_BIN {
                    return Err(GlbError::UnexpectedChunkType(tag));
                }
                let chunk = self.take_chunk(length, tag)?;
                self.state = ChunkState::Done;
                if self.remaining() > 0 {
                    debug!(
                        "skipping {} bytes of trailing extension chunks",
                        self.remaining()
                    );
                }
                Ok(Some(chunk))
            }
            ChunkState::Done => Ok(None),
        }
    }
}

impl<'a> Iterator for ChunkReader<'a> {
    type Item = Result<Chunk<'a>, GlbError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(chunk) => chunk.map(Ok),
            Err(e) => {
                self.state = ChunkState::Done;
                Some(Err(e))
            }
        }
    }
}

/// The payloads of a structurally valid GLB container.
#[derive(Debug, Clone, Copy)]
pub struct GlbChunks<'a> {
    pub header: ContainerHeader,
    pub json: &'a [u8],
    pub bin: Option<&'a [u8]>,
}

/// Validate the header and split the asset into its JSON and BIN payloads.
pub fn split_chunks(asset: &[u8], strict_padding: bool) -> Result<GlbChunks<'_>, GlbError> {
    let (header, start) = ContainerHeader::read(asset)?;
    if asset.len() > header.asset_len() {
        debug!(
            "ignoring {} bytes past the declared asset length",
            asset.len() - header.asset_len()
        );
    }

    let declared = ByteCursor::new(asset).slice(0, header.asset_len())?;
    let mut reader = ChunkReader::new(declared, start).with_strict_padding(strict_padding);

    let json = reader
        .next()
        .transpose()?
        .ok_or(GlbError::MissingJsonChunk)?
        .payload;
    let bin = reader.next().transpose()?.map(|chunk| chunk.payload);
    debug!(
        "GLB container: {} bytes JSON, {} bytes BIN",
        json.len(),
        bin.map_or(0, <[u8]>::len)
    );

    Ok(GlbChunks { header, json, bin })
}
