//! Orbit and pan navigation state.
//!
//! Exactly one of the two modes is selected at startup and never switched:
//! a perspective camera orbiting the origin in 3D mode, or an orthographic
//! window panning over a fixed world-space area in 2D mode. All input is
//! accumulated here as plain numeric state; the Bevy camera components are
//! derived on demand.

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use constants::navigation::{
    INITIAL_CAMERA_POSITION, INITIAL_ORTHO_WIDTH, INITIAL_PITCH_AXIS, ORBIT_DISTANCE_MAX,
    ORBIT_DISTANCE_MIN, ORBIT_VELOCITY, ORBIT_ZOOM_VELOCITY, ORTHO_WIDTH_MAX, ORTHO_WIDTH_MIN,
    ORTHO_ZOOM_VELOCITY, PAN_AREA, PAN_VELOCITY, PAN_VIEW_DISTANCE, PITCH_LIMIT,
};
use constants::render_settings::{FAR_PLANE, FIELD_OF_VIEW, NEAR_PLANE};

/// Perspective orbit about the world origin.
#[derive(Debug, Clone)]
pub struct OrbitState {
    pub position: Vec3,
    /// Horizontal reference axis the pitch rotates around; yaw drags rotate
    /// it together with the camera position.
    pub pitch_axis: Vec3,
    /// Cumulative pitch, degrees, clamped to the pitch limit.
    pub pitch: f32,
}

/// Orthographic pan over a fixed viewing area.
#[derive(Debug, Clone)]
pub struct PanState {
    pub offset: Vec2,
    /// Full width of the visible orthographic window, world units.
    pub width: f32,
}

#[derive(Debug, Clone)]
pub enum NavigationMode {
    Orbit(OrbitState),
    Pan(PanState),
}

#[derive(Resource, Debug, Clone)]
pub struct Navigation {
    pub mode: NavigationMode,
    pub aspect: f32,
}

impl Navigation {
    pub fn new(is_3d: bool, aspect: f32) -> Self {
        let mode = if is_3d {
            NavigationMode::Orbit(OrbitState {
                position: INITIAL_CAMERA_POSITION,
                pitch_axis: INITIAL_PITCH_AXIS,
                pitch: 0.0,
            })
        } else {
            NavigationMode::Pan(PanState {
                offset: Vec2::ZERO,
                width: INITIAL_ORTHO_WIDTH,
            })
        };
        Self { mode, aspect }
    }

    /// Applies one frame's mouse motion while the primary button is held.
    pub fn drag(&mut self, delta: Vec2) {
        match &mut self.mode {
            NavigationMode::Orbit(orbit) => orbit.drag(delta),
            NavigationMode::Pan(pan) => pan.drag(delta, self.aspect),
        }
    }

    /// Applies one frame's accumulated scroll-wheel delta.
    pub fn scroll(&mut self, delta: f32) {
        match &mut self.mode {
            NavigationMode::Orbit(orbit) => orbit.scroll(delta),
            NavigationMode::Pan(pan) => pan.scroll(delta),
        }
    }

    /// Resize only changes the aspect ratio; pan offset and zoom level keep
    /// their values, and the orthographic half height follows from the new
    /// aspect on the next projection read.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view_transform(&self) -> Transform {
        match &self.mode {
            NavigationMode::Orbit(orbit) => {
                Transform::from_translation(orbit.position).looking_at(Vec3::ZERO, Vec3::Y)
            }
            NavigationMode::Pan(pan) => {
                Transform::from_xyz(pan.offset.x, pan.offset.y, PAN_VIEW_DISTANCE)
            }
        }
    }

    pub fn projection(&self) -> Projection {
        match &self.mode {
            NavigationMode::Orbit(_) => Projection::Perspective(PerspectiveProjection {
                fov: FIELD_OF_VIEW.to_radians(),
                near: NEAR_PLANE,
                far: FAR_PLANE,
                ..default()
            }),
            NavigationMode::Pan(pan) => Projection::Orthographic(OrthographicProjection {
                near: NEAR_PLANE,
                far: FAR_PLANE,
                scaling_mode: ScalingMode::FixedHorizontal {
                    viewport_width: pan.width,
                },
                ..OrthographicProjection::default_3d()
            }),
        }
    }
}

impl OrbitState {
    fn drag(&mut self, delta: Vec2) {
        if delta.y != 0.0 {
            // Partial-step clamp: when the full step would overshoot the
            // pitch limit, apply only the remainder needed to reach it.
            let requested = ORBIT_VELOCITY * delta.y;
            let applied = if self.pitch + requested > PITCH_LIMIT {
                let applied = PITCH_LIMIT - self.pitch;
                self.pitch = PITCH_LIMIT;
                applied
            } else if self.pitch + requested < -PITCH_LIMIT {
                let applied = -PITCH_LIMIT - self.pitch;
                self.pitch = -PITCH_LIMIT;
                applied
            } else {
                self.pitch += requested;
                requested
            };
            self.position =
                Quat::from_axis_angle(self.pitch_axis, applied.to_radians()) * self.position;
        }
        if delta.x != 0.0 {
            // Full horizontal orbit is permitted, so yaw is unclamped.
            let yaw = Quat::from_rotation_y((-ORBIT_VELOCITY * delta.x).to_radians());
            self.position = yaw * self.position;
            self.pitch_axis = yaw * self.pitch_axis;
        }
    }

    fn scroll(&mut self, delta: f32) {
        let step = self.position.normalize() * (ORBIT_ZOOM_VELOCITY * -delta);
        let next = self.position + step;
        let distance = next.length();
        // Rejected outright when the step would leave the distance interval.
        if distance > ORBIT_DISTANCE_MIN && distance < ORBIT_DISTANCE_MAX {
            self.position = next;
        }
    }

    pub fn distance(&self) -> f32 {
        self.position.length()
    }
}

impl PanState {
    fn drag(&mut self, delta: Vec2, aspect: f32) {
        let half = self.half_extents(aspect);
        // A window taller than the pan area pins that axis to the center.
        let bound = (PAN_AREA / 2.0 - half).max(Vec2::ZERO);
        self.offset.x = (self.offset.x - PAN_VELOCITY * delta.x).clamp(-bound.x, bound.x);
        self.offset.y = (self.offset.y + PAN_VELOCITY * delta.y).clamp(-bound.y, bound.y);
    }

    fn scroll(&mut self, delta: f32) {
        let next = self.width + ORTHO_ZOOM_VELOCITY * -delta;
        if next > ORTHO_WIDTH_MIN && next < ORTHO_WIDTH_MAX {
            self.width = next;
        }
    }

    /// Half extents of the visible window; height follows the aspect ratio
    /// so the displayed image never distorts.
    pub fn half_extents(&self, aspect: f32) -> Vec2 {
        Vec2::new(self.width, self.width / aspect) / 2.0
    }
}
