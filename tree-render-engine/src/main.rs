use bevy::prelude::*;
use bevy::window::PresentMode;

use constants::render_settings::{SETTINGS_FILE, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};

use tree_render_engine::engine::camera::{Navigation, camera_controller};
use tree_render_engine::engine::lighting::update_light_direction;
use tree_render_engine::engine::mesh::build_tree_mesh;
use tree_render_engine::engine::settings::{TreeSettings, load_settings};
use tree_render_engine::engine::shaders::TreePanelMaterial;
use tree_render_engine::engine::tree::{TreeGeometry, generate};

/// Geometry buffers produced once at startup, read-only afterwards.
#[derive(Resource)]
struct TreeGeometryBuffers(TreeGeometry);

fn main() {
    // Configuration and parameter validation errors are fatal before any
    // window or GPU work begins.
    let settings = match load_settings(SETTINGS_FILE) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Cannot load settings: {err}");
            std::process::exit(1);
        }
    };

    let geometry = match generate(&settings) {
        Ok(geometry) => geometry,
        Err(err) => {
            eprintln!("Cannot generate Pythagoras tree: {err}");
            std::process::exit(1);
        }
    };

    create_app(settings, geometry).run();
}

fn create_app(settings: TreeSettings, geometry: TreeGeometry) -> App {
    let navigation = Navigation::new(settings.is_3d, WINDOW_WIDTH / WINDOW_HEIGHT);

    let mut app = App::new();
    app.add_plugins(create_default_plugins())
        .add_plugins(MaterialPlugin::<TreePanelMaterial>::default())
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(settings)
        .insert_resource(TreeGeometryBuffers(geometry))
        .insert_resource(navigation)
        .add_systems(Startup, setup)
        .add_systems(Update, (camera_controller, update_light_direction));

    app
}

fn create_default_plugins() -> impl PluginGroup {
    DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: WINDOW_TITLE.into(),
            resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    })
}

fn setup(
    mut commands: Commands,
    settings: Res<TreeSettings>,
    geometry: Res<TreeGeometryBuffers>,
    navigation: Res<Navigation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<TreePanelMaterial>>,
) {
    info!(
        "Generated {} panels across {} generations",
        geometry.0.panel_count(),
        settings.iterations
    );

    let mesh = build_tree_mesh(&geometry.0, settings.iterations);
    let material = TreePanelMaterial::from_settings(&settings);

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(material)),
        // Centers the root panel under the camera's focus.
        Transform::from_xyz(-settings.side / 2.0, -0.5, 0.0),
    ));

    commands.spawn((
        Camera3d::default(),
        navigation.view_transform(),
        navigation.projection(),
    ));
}
