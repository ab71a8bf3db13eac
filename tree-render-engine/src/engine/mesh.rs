//! Conversion of generated tree geometry into a renderable mesh.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, MeshVertexAttribute, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::VertexFormat;

use crate::engine::tree::geometry::{PANEL_INDICES, TreeGeometry, VERTICES_PER_PANEL};

/// Per-vertex gradient position derived from the panel's generation tag.
/// 1.0 at the root generation, 0.0 at the last.
pub const ATTRIBUTE_GENERATION_RATIO: MeshVertexAttribute =
    MeshVertexAttribute::new("GenerationRatio", 968721349, VertexFormat::Float32);

/// Gradient ratio of one panel. A single-generation tree has no gradient to
/// spread, so it renders entirely in the first color.
pub fn gradient_ratio(generation: u32, iterations: u32) -> f32 {
    if iterations <= 1 {
        1.0
    } else {
        1.0 - (generation - 1) as f32 / (iterations - 1) as f32
    }
}

/// Builds one mesh for the whole tree: the generator's parallel buffers plus
/// the fixed hexahedron index pattern offset per panel, so every panel draws
/// in a single call.
pub fn build_tree_mesh(geometry: &TreeGeometry, iterations: u32) -> Mesh {
    let ratios: Vec<f32> = geometry
        .generation_tags
        .iter()
        .flat_map(|&tag| [gradient_ratio(tag, iterations); VERTICES_PER_PANEL])
        .collect();

    let indices: Vec<u32> = (0..geometry.panel_count())
        .flat_map(|panel| {
            let base = (panel * VERTICES_PER_PANEL) as u32;
            PANEL_INDICES.map(|index| base + index)
        })
        .collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, geometry.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, geometry.normals.clone());
    mesh.insert_attribute(ATTRIBUTE_GENERATION_RATIO, ratios);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_spans_the_gradient() {
        assert_eq!(gradient_ratio(1, 5), 1.0);
        assert_eq!(gradient_ratio(5, 5), 0.0);
        assert_eq!(gradient_ratio(3, 5), 0.5);
    }

    #[test]
    fn single_generation_tree_uses_the_first_color() {
        assert_eq!(gradient_ratio(1, 1), 1.0);
    }

    #[test]
    fn index_pattern_is_a_closed_hexahedron() {
        // 12 triangles touching every one of the 8 corners.
        assert_eq!(PANEL_INDICES.len(), 36);
        for corner in 0..VERTICES_PER_PANEL as u32 {
            assert!(PANEL_INDICES.contains(&corner));
        }
        assert!(PANEL_INDICES.iter().all(|&index| index < 8));
    }

    #[test]
    fn indices_offset_by_eight_per_panel() {
        let geometry = TreeGeometry {
            positions: vec![[0.0; 3]; 16],
            normals: vec![[0.0; 3]; 16],
            generation_tags: vec![1, 2],
        };
        let mesh = build_tree_mesh(&geometry, 2);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), 72);
        assert!(indices[..36].iter().all(|&index| index < 8));
        assert!(indices[36..].iter().all(|&index| (8..16).contains(&index)));
        assert_eq!(indices[36], PANEL_INDICES[0] + 8);
    }
}
