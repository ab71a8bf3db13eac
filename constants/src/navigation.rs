use bevy::math::{Vec2, Vec3};

/// Degrees of camera rotation per pixel of mouse drag in orbit mode.
pub const ORBIT_VELOCITY: f32 = 0.175;

/// World units the camera travels along its radial direction per scroll step.
pub const ORBIT_ZOOM_VELOCITY: f32 = 0.2;

/// Camera distance from the origin must stay inside this open interval.
pub const ORBIT_DISTANCE_MIN: f32 = 2.0;
pub const ORBIT_DISTANCE_MAX: f32 = 30.0;

/// Cumulative camera pitch clamp, degrees.
pub const PITCH_LIMIT: f32 = 89.0;

pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 7.0);
pub const INITIAL_PITCH_AXIS: Vec3 = Vec3::new(-1.0, 0.0, 0.0);

/// World units of pan per pixel of mouse drag in orthographic mode.
pub const PAN_VELOCITY: f32 = 0.005;

/// Change in orthographic window width per scroll step.
pub const ORTHO_ZOOM_VELOCITY: f32 = 0.2;

/// Orthographic window width must stay inside this open interval.
pub const ORTHO_WIDTH_MIN: f32 = 1.0;
pub const ORTHO_WIDTH_MAX: f32 = 15.0;

pub const INITIAL_ORTHO_WIDTH: f32 = 4.0;

/// Fixed world-space rectangle the orthographic window may never leave.
pub const PAN_AREA: Vec2 = Vec2::new(20.0, 20.0);

/// Fixed eye distance of the orthographic view.
pub const PAN_VIEW_DISTANCE: f32 = 7.0;
