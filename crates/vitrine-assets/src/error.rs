use std::path::PathBuf;

/// Errors produced while parsing a binary glTF container.
///
/// Every variant is terminal for the parse call that produced it. Semantic
/// gaps (no meshes, no POSITION attribute, unknown material) are not errors;
/// they shrink the resulting scene instead.
#[derive(Debug, thiserror::Error)]
pub enum GlbError {
    #[error("read of {length} bytes at offset {offset} exceeds buffer of {available} bytes")]
    OutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },

    #[error("not a binary glTF file (magic {0:02x?})")]
    BadMagic([u8; 4]),

    #[error("unsupported GLB version {0}, only version 2 is supported")]
    UnsupportedVersion(u32),

    #[error("asset truncated: header declares {declared} bytes, {actual} available")]
    TruncatedAsset { declared: u64, actual: usize },

    #[error("first chunk is not a JSON chunk")]
    MissingJsonChunk,

    #[error("unexpected chunk type {0:#010x} where a BIN chunk was expected")]
    UnexpectedChunkType(u32),

    #[error("chunk at offset {offset} declares {declared} bytes, {remaining} remain")]
    TruncatedChunk {
        offset: usize,
        declared: u64,
        remaining: usize,
    },

    #[error("chunk at offset {offset} has length {length}, not a multiple of 4")]
    UnalignedChunk { offset: usize, length: u32 },

    #[error("JSON chunk is not valid UTF-8: {0}")]
    InvalidEncoding(#[source] std::str::Utf8Error),

    #[error("malformed scene descriptor: {0}")]
    MalformedDescriptor(#[source] serde_json::Error),

    #[error("accessor references buffer data but the asset has no BIN chunk")]
    MissingBinaryChunk,

    #[error("accessor needs bytes up to {required}, binary data holds {available}")]
    AccessorOutOfRange { required: u64, available: usize },

    #[error("accessor references missing buffer view {0}")]
    DanglingBufferView(usize),

    #[error("unsupported accessor layout: {0}")]
    UnsupportedAccessor(String),
}

/// Errors that can occur while loading assets from disk.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error loading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: GlbError,
    },
}
