//! The fixed 12-byte GLB file header.

use crate::cursor::ByteCursor;
use crate::error::GlbError;

pub const GLB_MAGIC: [u8; 4] = *b"glTF";
pub const GLB_VERSION: u32 = 2;
pub const HEADER_LEN: usize = 12;

/// Validated GLB file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub total_length: u32,
}

impl ContainerHeader {
    /// Validate the header at the start of `bytes`.
    ///
    /// Returns the header and the offset at which chunk data begins.
    pub fn read(bytes: &[u8]) -> Result<(Self, usize), GlbError> {
        let cursor = ByteCursor::new(bytes);
        let truncated = |_| GlbError::TruncatedAsset {
            declared: HEADER_LEN as u64,
            actual: bytes.len(),
        };

        let magic: [u8; 4] = cursor.read_array(0).map_err(truncated)?;
        if magic != GLB_MAGIC {
            return Err(GlbError::BadMagic(magic));
        }

        let version = cursor.read_u32_le(4).map_err(truncated)?;
        if version != GLB_VERSION {
            return Err(GlbError::UnsupportedVersion(version));
        }

        let total_length = cursor.read_u32_le(8).map_err(truncated)?;
        if (total_length as usize) < HEADER_LEN || total_length as usize > bytes.len() {
            return Err(GlbError::TruncatedAsset {
                declared: u64::from(total_length),
                actual: bytes.len(),
            });
        }

        let header = Self {
            magic,
            version,
            total_length,
        };
        Ok((header, HEADER_LEN))
    }

    /// Number of bytes covered by the header and its chunks.
    pub fn asset_len(&self) -> usize {
        self.total_length as usize
    }
}
