pub mod navigation;
pub mod render_settings;
