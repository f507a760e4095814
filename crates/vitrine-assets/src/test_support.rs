//! Builders for synthetic GLB assets used across the unit tests.

use crate::chunk::{CHUNK_BIN, CHUNK_JSON};
use crate::header::{GLB_MAGIC, GLB_VERSION, HEADER_LEN};

/// Assembles a GLB byte stream chunk by chunk.
pub(crate) struct GlbBuilder {
    magic: [u8; 4],
    version: u32,
    declared_len: Option<u32>,
    chunks: Vec<(u32, Vec<u8>)>,
}

impl GlbBuilder {
    pub(crate) fn new() -> Self {
        Self {
            magic: GLB_MAGIC,
            version: GLB_VERSION,
            declared_len: None,
            chunks: Vec::new(),
        }
    }

    pub(crate) fn magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = magic;
        self
    }

    pub(crate) fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub(crate) fn declared_len(mut self, len: u32) -> Self {
        self.declared_len = Some(len);
        self
    }

    /// JSON chunk, space-padded to a 4-byte boundary.
    pub(crate) fn json(self, json: &str) -> Self {
        let mut payload = json.as_bytes().to_vec();
        pad(&mut payload, b' ');
        self.chunk(CHUNK_JSON, payload)
    }

    /// BIN chunk, zero-padded to a 4-byte boundary.
    pub(crate) fn bin(self, bytes: &[u8]) -> Self {
        let mut payload = bytes.to_vec();
        pad(&mut payload, 0);
        self.chunk(CHUNK_BIN, payload)
    }

    /// Raw chunk with no padding applied.
    pub(crate) fn chunk(mut self, tag: u32, payload: Vec<u8>) -> Self {
        self.chunks.push((tag, payload));
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for (tag, payload) in &self.chunks {
            body.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            body.extend_from_slice(&tag.to_le_bytes());
            body.extend_from_slice(payload);
        }

        let total = self
            .declared_len
            .unwrap_or((HEADER_LEN + body.len()) as u32);
        let mut bytes = Vec::with_capacity(HEADER_LEN + body.len());
        bytes.extend_from_slice(&self.magic);
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&total.to_le_bytes());
        bytes.extend_from_slice(&body);
        bytes
    }
}

fn pad(payload: &mut Vec<u8>, fill: u8) {
    while payload.len() % 4 != 0 {
        payload.push(fill);
    }
}

/// Little-endian bytes of tightly packed float triples.
pub(crate) fn float3_bytes(values: &[[f32; 3]]) -> Vec<u8> {
    values
        .iter()
        .flatten()
        .flat_map(|v| v.to_le_bytes())
        .collect()
}

pub(crate) const TRIANGLE: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, -0.5]];
