//! End-to-end invariants of the geometry pipeline: generator output buffers,
//! gradient tagging and the mesh index pattern, over a grid of parameters.

use bevy::math::Vec3;
use bevy::render::mesh::Indices;

use tree_render_engine::engine::mesh::build_tree_mesh;
use tree_render_engine::engine::settings::TreeSettings;
use tree_render_engine::engine::tree::generate;

fn settings(iterations: u32, angle: f32, reversing: bool) -> TreeSettings {
    TreeSettings {
        is_3d: true,
        iterations,
        side: 1.0,
        depth: 0.25,
        angle,
        first_color: Vec3::new(1.0, 0.5, 0.0),
        last_color: Vec3::new(0.0, 0.25, 0.66),
        reversing,
        directed_light: true,
        dynamic_light: false,
    }
}

#[test]
fn buffers_stay_parallel_across_parameters() {
    for iterations in 1..=7 {
        for angle in [15.0, 30.0, 45.0, 60.0, 89.0] {
            for reversing in [false, true] {
                let geometry = generate(&settings(iterations, angle, reversing)).unwrap();
                let panels = 2usize.pow(iterations) - 1;
                assert_eq!(geometry.panel_count(), panels);
                assert_eq!(geometry.positions.len(), panels * 8);
                assert_eq!(geometry.normals.len(), panels * 8);
                assert!(
                    geometry
                        .generation_tags
                        .iter()
                        .all(|&tag| (1..=iterations).contains(&tag))
                );
            }
        }
    }
}

#[test]
fn every_generation_doubles_the_previous_one() {
    let iterations = 6;
    let geometry = generate(&settings(iterations, 40.0, false)).unwrap();
    for generation in 1..=iterations {
        let panels = geometry
            .generation_tags
            .iter()
            .filter(|&&tag| tag == generation)
            .count();
        assert_eq!(panels, 2usize.pow(generation - 1));
    }
}

#[test]
fn front_and_back_faces_mirror_in_depth() {
    let geometry = generate(&settings(4, 30.0, false)).unwrap();
    for panel in 0..geometry.panel_count() {
        let base = panel * 8;
        for corner in 0..4 {
            let front = geometry.positions[base + corner];
            let back = geometry.positions[base + 4 + corner];
            assert_eq!(front[0], back[0]);
            assert_eq!(front[1], back[1]);
            assert_eq!(front[2], -back[2]);
            assert_eq!(geometry.normals[base + corner][2], 1.0);
            assert_eq!(geometry.normals[base + 4 + corner][2], -1.0);
        }
    }
}

#[test]
fn mesh_carries_twelve_triangles_per_panel() {
    let geometry = generate(&settings(3, 45.0, true)).unwrap();
    let mesh = build_tree_mesh(&geometry, 3);
    let Some(Indices::U32(indices)) = mesh.indices() else {
        panic!("expected u32 indices");
    };
    assert_eq!(indices.len(), geometry.panel_count() * 36);
    let vertex_count = geometry.positions.len() as u32;
    assert!(indices.iter().all(|&index| index < vertex_count));
}

#[test]
fn degenerate_parameters_fail_before_emitting() {
    assert!(generate(&settings(3, 0.0, false)).is_err());
    assert!(generate(&settings(3, 90.0, false)).is_err());
    assert!(generate(&settings(0, 45.0, false)).is_err());
    let mut bad_side = settings(3, 45.0, false);
    bad_side.side = -1.0;
    assert!(generate(&bad_side).is_err());
}
