//! Typed view of the JSON chunk.
//!
//! Only the fields the assembler consumes are modelled. Every collection is
//! optional and defaults to empty, so decoding is permissive and the
//! assembler decides what is drawable.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::error::GlbError;

/// Name of the vertex position attribute.
pub const POSITION: &str = "POSITION";

/// Treat an explicit `null` like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The decoded JSON chunk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescriptor {
    #[serde(default)]
    pub asset: Option<AssetInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meshes: Vec<MeshDef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub materials: Vec<MaterialDef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accessors: Vec<AccessorDef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buffer_views: Vec<BufferViewDef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buffers: Vec<BufferDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub generator: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeshDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primitives: Vec<PrimitiveDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrimitiveDef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: BTreeMap<String, AccessorRef>,
    /// Signed so an invalid index degrades to the default material.
    #[serde(default)]
    pub material: Option<i64>,
}

/// An attribute's accessor, either inline or by index into `accessors`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AccessorRef {
    Index(usize),
    Inline(AccessorDef),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorDef {
    pub count: u32,
    #[serde(default)]
    pub buffer_view: Option<usize>,
    #[serde(default)]
    pub byte_offset: u32,
    /// glTF component type code; FLOAT when absent.
    #[serde(default)]
    pub component_type: Option<u32>,
    /// Element type such as "VEC3"; VEC3 when absent.
    #[serde(default, rename = "type")]
    pub element_type: Option<String>,
    #[serde(default)]
    pub normalized: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferViewDef {
    #[serde(default)]
    pub buffer: usize,
    #[serde(default)]
    pub byte_offset: u32,
    pub byte_length: u32,
    #[serde(default)]
    pub byte_stride: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferDef {
    #[serde(default)]
    pub byte_length: u32,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pbr_metallic_roughness: Option<PbrDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrDef {
    /// RGBA; only the first three entries are used.
    #[serde(default)]
    pub base_color_factor: Option<Vec<f32>>,
}

impl SceneDescriptor {
    /// Decode a JSON chunk payload.
    pub fn decode(payload: &[u8]) -> Result<Self, GlbError> {
        let text = std::str::from_utf8(payload).map_err(GlbError::InvalidEncoding)?;
        let text = text
            .trim_start_matches('\u{feff}')
            .trim_end_matches(|c: char| c == '\0' || c.is_ascii_whitespace());
        serde_json::from_str(text).map_err(GlbError::MalformedDescriptor)
    }

    /// Resolve an attribute reference to its accessor.
    pub fn accessor<'a>(&'a self, reference: &'a AccessorRef) -> Option<&'a AccessorDef> {
        match reference {
            AccessorRef::Index(index) => self.accessors.get(*index),
            AccessorRef::Inline(accessor) => Some(accessor),
        }
    }

    /// RGB of the base color factor of the material at `index`.
    ///
    /// `None` for an unknown index, a material without a factor, or a factor
    /// with fewer than three entries.
    pub fn base_color_rgb(&self, index: i64) -> Option<[f32; 3]> {
        let material = self.materials.get(usize::try_from(index).ok()?)?;
        match material.pbr_metallic_roughness.as_ref()?.base_color_factor.as_deref()? {
            [r, g, b, ..] => Some([*r, *g, *b]),
            _ => None,
        }
    }

    pub fn generator(&self) -> Option<&str> {
        self.asset.as_ref()?.generator.as_deref()
    }
}

impl PrimitiveDef {
    pub fn position(&self) -> Option<&AccessorRef> {
        self.attributes.get(POSITION)
    }
}
