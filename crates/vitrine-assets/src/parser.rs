//! Entry point that turns a GLB byte buffer into a [`SceneDescription`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembler::assemble;
use crate::chunk::split_chunks;
use crate::descriptor::SceneDescriptor;
use crate::error::GlbError;
use crate::scene::SceneDescription;

/// Which primitives of a mesh become scene meshes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitivePolicy {
    /// Only `primitives[0]`; further primitives are ignored.
    #[default]
    First,
    /// One scene mesh per primitive.
    All,
}

/// Parser configuration. Maps to the `[parse]` section of the viewer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub primitives: PrimitivePolicy,
    /// Reject chunks whose length is not a multiple of 4.
    pub strict_padding: bool,
}

/// Stateless GLB parser. Safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct GlbParser {
    options: ParseOptions,
}

impl GlbParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse one complete GLB asset.
    pub fn parse(&self, bytes: &[u8]) -> Result<SceneDescription, GlbError> {
        let chunks = split_chunks(bytes, self.options.strict_padding)?;
        let descriptor = SceneDescriptor::decode(chunks.json)?;
        let root = assemble(&descriptor, chunks.bin, &self.options)?;

        let generator = descriptor.generator().map(str::to_owned);
        debug!(
            "parsed GLB ({} bytes, generator {:?}): {} meshes",
            chunks.header.total_length,
            generator,
            root.len()
        );
        Ok(SceneDescription { root, generator })
    }
}

/// Parse a GLB asset with default options.
pub fn parse(bytes: &[u8]) -> Result<SceneDescription, GlbError> {
    GlbParser::default().parse(bytes)
}
