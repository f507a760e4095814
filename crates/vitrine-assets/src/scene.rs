//! Renderer-agnostic scene produced by the parser.

use glam::Vec3;
use vitrine_core::Color;

/// Vertex positions of one mesh. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Vec<[f32; 3]>,
}

impl Geometry {
    pub fn from_positions(positions: Vec<[f32; 3]>) -> Self {
        Self { positions }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Positions as raw bytes, ready for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Axis-aligned bounds as `(min, max)`, `None` for empty geometry.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.positions.iter().copied().map(Vec3::from);
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

/// Minimal surface description: a base color only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaterialSpec {
    pub base_color: Color,
}

/// A drawable mesh owning its geometry and material.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: Option<String>,
    pub geometry: Geometry,
    pub material: MaterialSpec,
}

/// Root grouping node of a parsed asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneNode {
    meshes: Vec<Mesh>,
}

impl SceneNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Total vertex count across all meshes.
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.geometry.vertex_count()).sum()
    }
}

/// Result of parsing one GLB asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDescription {
    pub root: SceneNode,
    /// Tool that wrote the asset, from `asset.generator`.
    pub generator: Option<String>,
}
