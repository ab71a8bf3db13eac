//! Recursive generation of the extruded-panel fractal.
//!
//! Each branch of the tree contributes one extruded rectangular panel and
//! exactly two children. A branch splits asymmetrically at `angle`: the two
//! children's edges are `side * sin(90 - angle)` and `side * sin(angle)`, so
//! their squares sum to the parent's square. Recursion is depth first, left
//! child before right, which fixes the emission order of the buffers.

use bevy::math::{Mat2, Quat, Vec2, Vec3};
use std::fmt;

use crate::engine::settings::TreeSettings;

pub const VERTICES_PER_PANEL: usize = 8;

/// Triangulation of one panel's 8 vertices (0..4 front face, 4..8 back face)
/// into a closed hexahedron: front and back quads plus the four side quads.
/// The pattern is parameter-independent; the mesh builder offsets it by
/// `8 * panel` per panel.
pub const PANEL_INDICES: [u32; 36] = [
    0, 1, 2, 0, 2, 3, // front
    1, 5, 6, 1, 6, 2, // right
    5, 4, 7, 5, 7, 6, // back
    4, 0, 3, 4, 3, 7, // left
    4, 5, 1, 4, 1, 0, // top
    3, 2, 6, 3, 6, 7, // bottom
];

#[derive(Debug, Clone, PartialEq)]
pub enum TreeGeometryError {
    NonPositiveSide(f32),
    AngleOutOfRange(f32),
    NoIterations,
}

impl fmt::Display for TreeGeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeGeometryError::NonPositiveSide(side) => {
                write!(f, "panel side must be positive, got {side}")
            }
            TreeGeometryError::AngleOutOfRange(angle) => {
                write!(f, "branch angle must lie strictly between 0 and 90 degrees, got {angle}")
            }
            TreeGeometryError::NoIterations => write!(f, "iteration count must be positive"),
        }
    }
}

impl std::error::Error for TreeGeometryError {}

/// Flat geometry buffers for the whole tree, read-only once produced.
#[derive(Debug, Default, Clone)]
pub struct TreeGeometry {
    /// 8 vertices per panel: 4 front corners at `+depth/2`, 4 back at
    /// `-depth/2`, in emission order.
    pub positions: Vec<[f32; 3]>,
    /// One per vertex; xy is the rotated compass-diagonal face normal,
    /// z is +1 on the front face and -1 on the back.
    pub normals: Vec<[f32; 3]>,
    /// One per panel: the 1-based generation that emitted it.
    pub generation_tags: Vec<u32>,
}

impl TreeGeometry {
    pub fn panel_count(&self) -> usize {
        self.generation_tags.len()
    }
}

/// Per-call context of one recursive step. Never stored beyond its call;
/// each step derives two fresh child frames instead of mutating a shared one.
struct BranchFrame {
    generation: u32,
    /// Edge length of this branch's panel.
    side: f32,
    /// Edge length used to reach this branch, carried forward for the
    /// translation offset. Zero at the root.
    parent_side: f32,
    /// Effective split angle for this frame, degrees. Reversing mode swaps it
    /// to its complement on every generation after the first.
    split_angle: f32,
    /// Cumulative rotation about the extrusion axis, degrees.
    absolute_angle: f32,
    is_left: bool,
    parent_is_left: bool,
    /// Accumulated translation. Rotation state lives in `absolute_angle`.
    origin: Vec3,
}

fn rotate_z(v: Vec3, degrees: f32) -> Vec3 {
    Quat::from_rotation_z(degrees.to_radians()) * v
}

fn rotate_2d(v: Vec2, degrees: f32) -> Vec2 {
    Mat2::from_angle(degrees.to_radians()) * v
}

/// Generates the whole tree eagerly. Fails before emitting anything if the
/// parameters describe a degenerate tree; otherwise always terminates, since
/// recursion is bounded by the iteration count.
pub fn generate(settings: &TreeSettings) -> Result<TreeGeometry, TreeGeometryError> {
    if settings.side <= 0.0 {
        return Err(TreeGeometryError::NonPositiveSide(settings.side));
    }
    if settings.angle <= 0.0 || settings.angle >= 90.0 {
        return Err(TreeGeometryError::AngleOutOfRange(settings.angle));
    }
    if settings.iterations == 0 {
        return Err(TreeGeometryError::NoIterations);
    }

    let mut geometry = TreeGeometry::default();
    let root = BranchFrame {
        generation: 1,
        side: settings.side,
        parent_side: 0.0,
        split_angle: settings.angle,
        absolute_angle: 0.0,
        // The root has no true laterality; these only feed the alignment
        // correction, which is a no-op when both agree.
        is_left: true,
        parent_is_left: true,
        origin: Vec3::ZERO,
    };
    grow(
        &root,
        settings.depth,
        settings.iterations,
        settings.reversing,
        &mut geometry,
    );

    Ok(geometry)
}

fn grow(
    frame: &BranchFrame,
    panel_depth: f32,
    iterations: u32,
    reversing: bool,
    out: &mut TreeGeometry,
) {
    // The base case is a no-op one level past the last emitted generation.
    if frame.generation > iterations {
        return;
    }

    let origin = frame.origin + translation(frame);

    emit_panel(frame, origin, panel_depth, out);

    let (left, right) = frame.children(origin, reversing);
    grow(&left, panel_depth, iterations, reversing, out);
    grow(&right, panel_depth, iterations, reversing, out);
}

/// Offset placing this branch's panel against its parent's edge.
fn translation(frame: &BranchFrame) -> Vec3 {
    let swing = if frame.is_left {
        frame.absolute_angle - frame.split_angle
    } else {
        frame.absolute_angle + 90.0 - frame.split_angle
    };
    // Fixed quarter turn on top of the swing aligns panel edge to panel edge.
    let offset = rotate_z(Vec3::new(frame.parent_side, 0.0, 0.0), swing + 90.0);

    let mut translation = offset;
    // When the branch sequence changes sides, one more quarter turn of the
    // same offset keeps successive panels flush.
    if frame.parent_is_left && !frame.is_left {
        translation += rotate_z(offset, -90.0);
    } else if !frame.parent_is_left && frame.is_left {
        translation += rotate_z(offset, 90.0);
    }
    translation
}

fn emit_panel(frame: &BranchFrame, origin: Vec3, panel_depth: f32, out: &mut TreeGeometry) {
    let corners = [
        Vec3::new(0.0, frame.side, panel_depth),
        Vec3::new(frame.side, frame.side, panel_depth),
        Vec3::new(frame.side, 0.0, panel_depth),
        Vec3::new(0.0, 0.0, panel_depth),
    ];
    // Compass-diagonal face normals, matching the faceted-box shading model.
    let face_normals = [
        Vec2::new(-1.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(-1.0, -1.0),
    ];

    let spin = if frame.is_left {
        frame.absolute_angle
    } else {
        frame.absolute_angle + 90.0
    };
    let corners = corners.map(|corner| rotate_z(corner, spin) + origin);
    let normals = face_normals.map(|normal| rotate_2d(normal, spin));

    for (corner, normal) in corners.iter().zip(&normals) {
        out.positions.push([corner.x, corner.y, corner.z / 2.0]);
        out.normals.push([normal.x, normal.y, 1.0]);
    }
    for (corner, normal) in corners.iter().zip(&normals) {
        out.positions.push([corner.x, corner.y, -corner.z / 2.0]);
        out.normals.push([normal.x, normal.y, -1.0]);
    }

    out.generation_tags.push(frame.generation);
}

impl BranchFrame {
    /// Derives the two child frames. The left child is always recursed first.
    fn children(&self, origin: Vec3, reversing: bool) -> (BranchFrame, BranchFrame) {
        let angle = self.split_angle;

        if self.generation == 1 || !reversing {
            let left = self.child(
                (90.0 - angle).to_radians().sin() * self.side,
                angle,
                self.absolute_angle + angle,
                true,
                origin,
            );
            let right = self.child(
                angle.to_radians().sin() * self.side,
                angle,
                self.absolute_angle - (90.0 - angle),
                false,
                origin,
            );
            (left, right)
        } else {
            // Reversing mode swaps the angle roles of the two children. The
            // odd-generation and even-generation rules turned out identical,
            // so a single arm covers both.
            let left = self.child(
                angle.to_radians().sin() * self.side,
                90.0 - angle,
                self.absolute_angle + (90.0 - angle),
                true,
                origin,
            );
            let right = self.child(
                (90.0 - angle).to_radians().sin() * self.side,
                90.0 - angle,
                self.absolute_angle - angle,
                false,
                origin,
            );
            (left, right)
        }
    }

    fn child(
        &self,
        side: f32,
        split_angle: f32,
        absolute_angle: f32,
        is_left: bool,
        origin: Vec3,
    ) -> BranchFrame {
        BranchFrame {
            generation: self.generation + 1,
            side,
            parent_side: self.side,
            split_angle,
            absolute_angle,
            is_left,
            parent_is_left: self.is_left,
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings(iterations: u32, reversing: bool) -> TreeSettings {
        TreeSettings {
            is_3d: true,
            iterations,
            side: 1.0,
            depth: 0.2,
            angle: 30.0,
            first_color: Vec3::ONE,
            last_color: Vec3::ZERO,
            reversing,
            directed_light: false,
            dynamic_light: false,
        }
    }

    #[test]
    fn panel_count_follows_binary_branching() {
        for iterations in 1..=6 {
            for reversing in [false, true] {
                let geometry = generate(&test_settings(iterations, reversing)).unwrap();
                let expected = 2usize.pow(iterations) - 1;
                assert_eq!(geometry.panel_count(), expected);
                assert_eq!(geometry.positions.len(), expected * VERTICES_PER_PANEL);
                assert_eq!(geometry.normals.len(), expected * VERTICES_PER_PANEL);
            }
        }
    }

    #[test]
    fn tags_stay_within_generation_range() {
        let iterations = 5;
        let geometry = generate(&test_settings(iterations, false)).unwrap();
        assert!(
            geometry
                .generation_tags
                .iter()
                .all(|&tag| (1..=iterations).contains(&tag))
        );
        let roots = geometry.generation_tags.iter().filter(|&&tag| tag == 1).count();
        assert_eq!(roots, 1);
    }

    #[test]
    fn emission_order_is_depth_first_left_first() {
        let geometry = generate(&test_settings(3, false)).unwrap();
        assert_eq!(geometry.generation_tags, vec![1, 2, 3, 3, 2, 3, 3]);
    }

    #[test]
    fn child_sides_satisfy_right_triangle_relation() {
        let frame = BranchFrame {
            generation: 2,
            side: 1.7,
            parent_side: 2.0,
            split_angle: 35.0,
            absolute_angle: 12.0,
            is_left: true,
            parent_is_left: true,
            origin: Vec3::ZERO,
        };
        let (left, right) = frame.children(Vec3::ZERO, false);
        let squares = left.side * left.side + right.side * right.side;
        assert!((squares - frame.side * frame.side).abs() < 1e-5);
    }

    #[test]
    fn reversing_children_swap_angle_roles() {
        let frame = BranchFrame {
            generation: 2,
            side: 1.0,
            parent_side: 1.0,
            split_angle: 30.0,
            absolute_angle: 0.0,
            is_left: true,
            parent_is_left: true,
            origin: Vec3::ZERO,
        };
        let (left, right) = frame.children(Vec3::ZERO, true);
        // Left takes the short edge, right the long one, both at the
        // complementary split angle.
        assert!((left.side - 30f32.to_radians().sin()).abs() < 1e-6);
        assert!((right.side - 60f32.to_radians().sin()).abs() < 1e-6);
        assert_eq!(left.split_angle, 60.0);
        assert_eq!(right.split_angle, 60.0);
        assert_eq!(left.absolute_angle, 60.0);
        assert_eq!(right.absolute_angle, -30.0);
    }

    #[test]
    fn generation_one_never_reverses() {
        let settings = test_settings(2, true);
        let geometry = generate(&settings).unwrap();
        assert_eq!(geometry.panel_count(), 3);
    }

    #[test]
    fn root_panel_sits_at_the_identity_frame() {
        let settings = test_settings(1, false);
        let geometry = generate(&settings).unwrap();
        assert_eq!(geometry.positions[0], [0.0, 1.0, 0.1]);
        assert_eq!(geometry.positions[4], [0.0, 1.0, -0.1]);
        assert_eq!(geometry.normals[0], [-1.0, 1.0, 1.0]);
        assert_eq!(geometry.normals[4], [-1.0, 1.0, -1.0]);
    }

    #[test]
    fn rejects_non_positive_side() {
        let mut settings = test_settings(3, false);
        settings.side = 0.0;
        let err = generate(&settings).unwrap_err();
        assert_eq!(err, TreeGeometryError::NonPositiveSide(0.0));
    }

    #[test]
    fn rejects_right_angle_split() {
        let mut settings = test_settings(3, false);
        settings.angle = 90.0;
        let err = generate(&settings).unwrap_err();
        assert_eq!(err, TreeGeometryError::AngleOutOfRange(90.0));
    }

    #[test]
    fn rejects_zero_iterations() {
        let settings = test_settings(0, false);
        let err = generate(&settings).unwrap_err();
        assert_eq!(err, TreeGeometryError::NoIterations);
    }
}
