//! Gradient-and-lighting material for the tree panels.

use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType, SpecializedMeshPipelineError,
};

use crate::engine::mesh::ATTRIBUTE_GENERATION_RATIO;
use crate::engine::settings::TreeSettings;

/// Uniform block shared by the vertex and fragment stages.
#[derive(Debug, Clone, Copy, ShaderType)]
pub struct TreePanelUniform {
    pub first_color: Vec4,
    pub last_color: Vec4,
    /// xyz = light direction, w = directed-light flag.
    pub light_direction: Vec4,
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct TreePanelMaterial {
    #[uniform(0)]
    pub params: TreePanelUniform,
}

impl TreePanelMaterial {
    pub fn from_settings(settings: &TreeSettings) -> Self {
        let directed = if settings.directed_light { 1.0 } else { 0.0 };
        Self {
            params: TreePanelUniform {
                first_color: settings.first_color.extend(1.0),
                last_color: settings.last_color.extend(1.0),
                light_direction: constants::render_settings::INITIAL_LIGHT_DIRECTION
                    .extend(directed),
            },
        }
    }
}

impl Material for TreePanelMaterial {
    fn vertex_shader() -> ShaderRef {
        "shaders/tree_panel.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "shaders/tree_panel.wgsl".into()
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_NORMAL.at_shader_location(1),
            ATTRIBUTE_GENERATION_RATIO.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings(directed_light: bool) -> TreeSettings {
        TreeSettings {
            is_3d: true,
            iterations: 3,
            side: 1.0,
            depth: 0.2,
            angle: 45.0,
            first_color: Vec3::new(1.0, 0.5, 0.0),
            last_color: Vec3::new(0.0, 0.0, 1.0),
            reversing: false,
            directed_light,
            dynamic_light: false,
        }
    }

    #[test]
    fn uniform_carries_gradient_endpoints() {
        let material = TreePanelMaterial::from_settings(&test_settings(true));
        assert_eq!(material.params.first_color, Vec4::new(1.0, 0.5, 0.0, 1.0));
        assert_eq!(material.params.last_color, Vec4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn directed_flag_rides_in_the_light_direction_w() {
        let directed = TreePanelMaterial::from_settings(&test_settings(true));
        assert_eq!(directed.params.light_direction.w, 1.0);
        let flat = TreePanelMaterial::from_settings(&test_settings(false));
        assert_eq!(flat.params.light_direction.w, 0.0);
    }
}
