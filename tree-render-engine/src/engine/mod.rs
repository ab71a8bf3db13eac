pub mod camera;
pub mod lighting;
pub mod mesh;
pub mod settings;
pub mod shaders;
pub mod tree;
