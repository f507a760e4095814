//! Vitrine Assets - Binary glTF loading for the Vitrine model viewer
//!
//! Parses GLB containers into a renderer-agnostic scene description:
//! position geometry, a base color per mesh, and a root node grouping the
//! meshes. The parser performs no I/O; [`AssetServer`] adds file loading
//! and caching on top of it.
//!
//! Known restrictions: only the POSITION attribute is read, only
//! `primitives[0]` of each mesh is used unless [`PrimitivePolicy::All`] is
//! selected, and buffers must live in the GLB container itself.

mod assembler;
mod chunk;
mod cursor;
mod descriptor;
mod error;
mod header;
mod parser;
mod resolver;
mod scene;
mod server;

#[cfg(test)]
mod test_support;

pub use assembler::assemble;
pub use chunk::{
    split_chunks, Chunk, ChunkReader, ChunkState, ChunkType, GlbChunks, CHUNK_BIN, CHUNK_JSON,
};
pub use cursor::ByteCursor;
pub use descriptor::{
    AccessorDef, AccessorRef, AssetInfo, BufferDef, BufferViewDef, MaterialDef, MeshDef, PbrDef,
    PrimitiveDef, SceneDescriptor, POSITION,
};
pub use error::{AssetError, GlbError};
pub use header::{ContainerHeader, GLB_MAGIC, GLB_VERSION, HEADER_LEN};
pub use parser::{parse, GlbParser, ParseOptions, PrimitivePolicy};
pub use resolver::{BufferResolver, ComponentType};
pub use scene::{Geometry, MaterialSpec, Mesh, SceneDescription, SceneNode};
pub use server::AssetServer;
