use bevy::math::Vec3;

pub const WINDOW_WIDTH: f32 = 600.0;
pub const WINDOW_HEIGHT: f32 = 600.0;
pub const WINDOW_TITLE: &str = "PythagorasTree";

/// Vertical field of view of the perspective projection, degrees.
pub const FIELD_OF_VIEW: f32 = 45.0;
pub const NEAR_PLANE: f32 = 1.0;
pub const FAR_PLANE: f32 = 50.0;

pub const INITIAL_LIGHT_DIRECTION: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Yaw applied to the light direction each frame when dynamic lighting is on,
/// degrees.
pub const LIGHT_YAW_STEP: f32 = 0.3;

pub const SETTINGS_FILE: &str = "settings.txt";
