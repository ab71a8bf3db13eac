use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::camera::navigation::Navigation;

/// Drains one frame of input, advances the navigation state and syncs the
/// camera entity. Runs every frame; drag deltas only apply while the primary
/// button is held.
pub fn camera_controller(
    mut navigation: ResMut<Navigation>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera: Query<(&mut Transform, &mut Projection), With<Camera3d>>,
) {
    if let Ok(window) = windows.single() {
        navigation.set_aspect(window.width() / window.height());
    }

    let mouse_delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        navigation.drag(mouse_delta);
    }

    let mut scroll = 0.0;
    for event in scroll_events.read() {
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y * 0.05,
        };
    }
    if scroll.abs() > f32::EPSILON {
        navigation.scroll(scroll);
    }

    if let Ok((mut transform, mut projection)) = camera.single_mut() {
        *transform = navigation.view_transform();
        *projection = navigation.projection();
    }
}
