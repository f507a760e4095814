//! Human-readable summary of a parsed scene

use vitrine_assets::{Mesh, SceneDescription};

/// One line per mesh: name, vertex count, base color and bounds.
pub fn mesh_lines(scene: &SceneDescription) -> Vec<String> {
    scene
        .root
        .meshes()
        .iter()
        .enumerate()
        .map(|(index, mesh)| mesh_line(index, mesh))
        .collect()
}

fn mesh_line(index: usize, mesh: &Mesh) -> String {
    let name = mesh.name.as_deref().unwrap_or("unnamed");
    let bounds = match mesh.geometry.bounds() {
        Some((min, max)) => format!(
            "[{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
            min.x, min.y, min.z, max.x, max.y, max.z
        ),
        None => "empty".to_string(),
    };
    format!(
        "#{index} '{name}': {} vertices, color {}, bounds {bounds}",
        mesh.geometry.vertex_count(),
        mesh.material.base_color,
    )
}
