//! Dynamic light rotation.

use bevy::prelude::*;

use constants::render_settings::LIGHT_YAW_STEP;

use crate::engine::settings::TreeSettings;
use crate::engine::shaders::TreePanelMaterial;

/// Swings the light direction around the vertical axis by a fixed yaw step
/// each frame when dynamic lighting is enabled; otherwise the direction set
/// at startup stays put.
pub fn update_light_direction(
    settings: Res<TreeSettings>,
    mut materials: ResMut<Assets<TreePanelMaterial>>,
) {
    if !settings.dynamic_light {
        return;
    }

    let step = Quat::from_rotation_y(LIGHT_YAW_STEP.to_radians());
    for (_, material) in materials.iter_mut() {
        let flag = material.params.light_direction.w;
        let direction = step * material.params.light_direction.truncate();
        material.params.light_direction = direction.extend(flag);
    }
}
