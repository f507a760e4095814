//! Builds the output scene from a decoded descriptor.
//!
//! Structural problems were already rejected by the container checks. Here,
//! anything that cannot be drawn is skipped so a partial asset still yields
//! a partial scene. Only failures while reading vertex data are fatal.

use tracing::{debug, warn};
use vitrine_core::Color;

use crate::descriptor::{MeshDef, PrimitiveDef, SceneDescriptor};
use crate::error::GlbError;
use crate::parser::{ParseOptions, PrimitivePolicy};
use crate::resolver::BufferResolver;
use crate::scene::{Geometry, MaterialSpec, Mesh, SceneNode};

/// Assemble the root node for `descriptor`, reading vertex data from `bin`.
pub fn assemble(
    descriptor: &SceneDescriptor,
    bin: Option<&[u8]>,
    options: &ParseOptions,
) -> Result<SceneNode, GlbError> {
    let mut root = SceneNode::new();
    if descriptor.meshes.is_empty() {
        warn!("asset contains no meshes");
        return Ok(root);
    }

    let resolver = BufferResolver::new(descriptor, bin);
    for (index, mesh_def) in descriptor.meshes.iter().enumerate() {
        if mesh_def.primitives.is_empty() {
            debug!("skipping mesh {} with no primitives", index);
            continue;
        }
        if options.primitives == PrimitivePolicy::First && mesh_def.primitives.len() > 1 {
            debug!(
                "mesh {} has {} primitives, only the first is used",
                index,
                mesh_def.primitives.len()
            );
        }

        let take = match options.primitives {
            PrimitivePolicy::First => 1,
            PrimitivePolicy::All => mesh_def.primitives.len(),
        };
        for primitive in mesh_def.primitives.iter().take(take) {
            if let Some(mesh) = build_mesh(descriptor, &resolver, mesh_def, index, primitive)? {
                root.add(mesh);
            }
        }
    }

    debug!(
        "assembled {} of {} meshes, {} vertices",
        root.len(),
        descriptor.meshes.len(),
        root.vertex_count()
    );
    Ok(root)
}

fn build_mesh(
    descriptor: &SceneDescriptor,
    resolver: &BufferResolver<'_>,
    mesh_def: &MeshDef,
    index: usize,
    primitive: &PrimitiveDef,
) -> Result<Option<Mesh>, GlbError> {
    let Some(reference) = primitive.position() else {
        debug!("skipping primitive of mesh {} without POSITION", index);
        return Ok(None);
    };
    let Some(accessor) = descriptor.accessor(reference) else {
        warn!("mesh {} references a missing POSITION accessor", index);
        return Ok(None);
    };

    let positions = resolver.resolve_positions(accessor)?;
    Ok(Some(Mesh {
        name: mesh_def.name.clone(),
        geometry: Geometry::from_positions(positions),
        material: material_for(descriptor, primitive.material),
    }))
}

/// White unless the referenced material declares a base color factor.
fn material_for(descriptor: &SceneDescriptor, material: Option<i64>) -> MaterialSpec {
    let base_color = material
        .and_then(|index| descriptor.base_color_rgb(index))
        .map_or(Color::WHITE, Color::from);
    MaterialSpec { base_color }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{float3_bytes, TRIANGLE};

    fn decode(json: &str) -> SceneDescriptor {
        SceneDescriptor::decode(json.as_bytes()).unwrap()
    }

    #[test]
    fn empty_mesh_list_is_an_empty_scene() {
        let root = assemble(&decode(r#"{"meshes": []}"#), None, &ParseOptions::default()).unwrap();
        assert!(root.is_empty());
    }

    #[test]
    fn primitive_without_position_is_skipped() {
        let descriptor = decode(
            r#"{"meshes": [
                {"primitives": [{"attributes": {"NORMAL": {"count": 3}}}]},
                {"primitives": [{"attributes": {"POSITION": {"count": 3}}}]}
            ]}"#,
        );
        let bin = float3_bytes(&TRIANGLE);
        let root = assemble(&descriptor, Some(&bin), &ParseOptions::default()).unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root.meshes()[0].geometry.positions(), &TRIANGLE);
    }

    #[test]
    fn mesh_without_primitives_is_skipped() {
        let descriptor = decode(r#"{"meshes": [{"name": "empty", "primitives": []}, {}]}"#);
        let root = assemble(&descriptor, None, &ParseOptions::default()).unwrap();
        assert!(root.is_empty());
    }

    #[test]
    fn dangling_accessor_index_is_skipped() {
        let descriptor = decode(r#"{"meshes": [{"primitives": [{"attributes": {"POSITION": 4}}]}]}"#);
        let root = assemble(&descriptor, None, &ParseOptions::default()).unwrap();
        assert!(root.is_empty());
    }

    #[test]
    fn material_color_overrides_white() {
        let descriptor = decode(
            r#"{"meshes": [
                {"primitives": [{"attributes": {"POSITION": {"count": 3}}, "material": 0}]},
                {"primitives": [{"attributes": {"POSITION": {"count": 3}}}]},
                {"primitives": [{"attributes": {"POSITION": {"count": 3}}, "material": 9}]}
            ],
            "materials": [{"pbrMetallicRoughness": {"baseColorFactor": [1, 0, 0, 0.25]}}]}"#,
        );
        let bin = float3_bytes(&TRIANGLE);
        let root = assemble(&descriptor, Some(&bin), &ParseOptions::default()).unwrap();
        let colors: Vec<Color> = root.meshes().iter().map(|m| m.material.base_color).collect();
        assert_eq!(
            colors,
            vec![Color::rgb(1.0, 0.0, 0.0), Color::WHITE, Color::WHITE]
        );
    }

    #[test]
    fn invalid_material_data_falls_back_to_white() {
        let descriptor = decode(
            r#"{"meshes": [
                {"primitives": [{"attributes": {"POSITION": {"count": 3}}, "material": -1}]},
                {"primitives": [{"attributes": {"POSITION": {"count": 3}}, "material": 1}]},
                {"primitives": [{"attributes": {"POSITION": {"count": 3}}, "material": 0}]}
            ],
            "materials": [
                {"pbrMetallicRoughness": {"baseColorFactor": [1, 0, 0]}},
                {"pbrMetallicRoughness": {"baseColorFactor": [0, 1]}}
            ]}"#,
        );
        let bin = float3_bytes(&TRIANGLE);
        let root = assemble(&descriptor, Some(&bin), &ParseOptions::default()).unwrap();
        let colors: Vec<Color> = root.meshes().iter().map(|m| m.material.base_color).collect();
        assert_eq!(
            colors,
            vec![Color::WHITE, Color::WHITE, Color::rgb(1.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn null_primitives_and_attributes_are_skipped() {
        let descriptor = decode(
            r#"{"meshes": [
                {"primitives": null},
                {"primitives": [{"attributes": null}]},
                {"primitives": [{"attributes": {"POSITION": {"count": 3}}}]}
            ], "materials": null}"#,
        );
        let bin = float3_bytes(&TRIANGLE);
        let root = assemble(&descriptor, Some(&bin), &ParseOptions::default()).unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root.meshes()[0].material.base_color, Color::WHITE);
    }

    #[test]
    fn only_first_primitive_by_default() {
        let descriptor = decode(
            r#"{"meshes": [{"name": "pair", "primitives": [
                {"attributes": {"POSITION": {"count": 3}}},
                {"attributes": {"POSITION": {"count": 2}}, "material": 0}
            ]}],
            "materials": [{"pbrMetallicRoughness": {"baseColorFactor": [0, 0, 1, 1]}}]}"#,
        );
        let bin = float3_bytes(&TRIANGLE);

        let first = assemble(&descriptor, Some(&bin), &ParseOptions::default()).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first.meshes()[0].name.as_deref(), Some("pair"));
        assert_eq!(first.meshes()[0].geometry.vertex_count(), 3);

        let options = ParseOptions {
            primitives: PrimitivePolicy::All,
            ..Default::default()
        };
        let all = assemble(&descriptor, Some(&bin), &options).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.meshes()[1].geometry.vertex_count(), 2);
        assert_eq!(all.meshes()[1].material.base_color, Color::rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn first_primitive_without_position_skips_mesh() {
        let descriptor = decode(
            r#"{"meshes": [{"primitives": [
                {"attributes": {}},
                {"attributes": {"POSITION": {"count": 3}}}
            ]}]}"#,
        );
        let bin = float3_bytes(&TRIANGLE);
        let root = assemble(&descriptor, Some(&bin), &ParseOptions::default()).unwrap();
        assert!(root.is_empty());
    }

    #[test]
    fn resolver_errors_are_fatal() {
        let descriptor = decode(r#"{"meshes": [{"primitives": [{"attributes": {"POSITION": {"count": 3}}}]}]}"#);
        assert!(matches!(
            assemble(&descriptor, None, &ParseOptions::default()),
            Err(GlbError::MissingBinaryChunk)
        ));
    }
}
