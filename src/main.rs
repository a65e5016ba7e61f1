use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod camera;
mod config;
mod core;
mod orbital;
mod ui;
mod visualization;

use camera::{CameraControlPlugin, MainCamera, ORBIT_NEAR_CLIP};
use config::AppConfig;
use crate::core::space::world_to_bevy;
use orbital::OrbitalPlugin;
use ui::UiPlugin;
use visualization::VisualizationPlugin;

/// Initial camera position, world frame: below the ecliptic looking up at the Sun.
const INITIAL_CAMERA_WORLD: DVec3 = DVec3::new(0.0, -1000.0, 200.0);

// Setup scene and camera
pub fn setup(mut commands: Commands) {
    // Keep the night side faintly visible
    commands.insert_resource(GlobalAmbientLight {
        brightness: 80.0,
        ..default()
    });

    let position = world_to_bevy(INITIAL_CAMERA_WORLD);
    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            // To-scale distances reach ~25k units; the default far plane would clip the orbit
            near: ORBIT_NEAR_CLIP,
            far: 1_000_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Loaded once logging is up; plugins below read it while building
    app.insert_resource(AppConfig::load_or_default());

    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(OrbitalPlugin);
    app.add_plugins(CameraControlPlugin);
    app.add_plugins(UiPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_systems(Startup, setup);

    app.run();
}
