//! Camera control
//!
//! Orbit and follow modes drive `bevy_panorbit_camera`. Surface mode switches the pan-orbit
//! controller off and writes the camera transform directly, after the pan-orbit systems and
//! before transform propagation so the rendered frame sees this frame's pose.

use bevy::prelude::*;
use bevy::transform::TransformSystems;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraSystemSet};

pub mod mode;
pub mod surface;

pub use mode::{CameraMode, DirectionalInput};
pub use surface::{ORBIT_NEAR_CLIP, near_clip, surface_observer_pose};

use crate::config::AppConfig;
use crate::core::coordinates::GeographicPoint;
use crate::core::scale::ScaleSettings;
use crate::core::space::world_to_bevy;
use crate::orbital::{LatestSnapshot, SimulationSet};

/// Marker for the main 3D camera.
#[derive(Component)]
pub struct MainCamera;

/// Geographic site of the surface observer (west-positive longitude).
#[derive(Resource, Clone, Copy, Debug)]
pub struct ObserverSite(pub GeographicPoint);

pub struct CameraControlPlugin;

impl Plugin for CameraControlPlugin {
    fn build(&self, app: &mut App) {
        let site = app
            .world()
            .get_resource::<AppConfig>()
            .map(AppConfig::observer_site)
            .unwrap_or_else(|| AppConfig::default().observer_site());

        app.insert_resource(ObserverSite(site))
            .init_resource::<CameraMode>()
            .init_resource::<DirectionalInput>()
            .add_systems(
                Update,
                (
                    sample_directional_input,
                    accumulate_surface_offsets,
                    sync_pan_orbit_focus,
                    sync_near_clip,
                )
                    .chain()
                    .after(SimulationSet::OrbitPath),
            )
            .add_systems(
                PostUpdate,
                apply_surface_observer
                    .after(PanOrbitCameraSystemSet)
                    .before(bevy::camera::CameraUpdateSystems)
                    .before(TransformSystems::Propagate),
            );
    }
}

fn sample_directional_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<DirectionalInput>) {
    let next = DirectionalInput::from_keys(&keys);
    if *input != next {
        *input = next;
    }
}

fn accumulate_surface_offsets(
    time: Res<Time>,
    input: Res<DirectionalInput>,
    mut mode: ResMut<CameraMode>,
) {
    if input.is_idle() || !mode.is_surface() {
        return;
    }
    mode.apply_input(*input, time.delta_secs_f64());
}

/// Point the pan-orbit controller at the target of the current mode.
fn sync_pan_orbit_focus(
    mode: Res<CameraMode>,
    snapshot: Res<LatestSnapshot>,
    mut previous: Local<Option<std::mem::Discriminant<CameraMode>>>,
    mut cameras: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    let current = std::mem::discriminant(&*mode);
    let entered = *previous != Some(current);
    *previous = Some(current);

    for mut pan_orbit in &mut cameras {
        match *mode {
            CameraMode::OrbitTarget => {
                if entered {
                    pan_orbit.enabled = true;
                    pan_orbit.target_focus = Vec3::ZERO;
                    pan_orbit.force_update = true;
                }
            }
            CameraMode::FollowTarget => {
                let Some(snapshot) = snapshot.get() else {
                    continue;
                };
                let earth = world_to_bevy(snapshot.earth_position);
                if entered {
                    pan_orbit.enabled = true;
                }
                if entered || pan_orbit.target_focus != earth {
                    // Keep both in lockstep so Earth stays centred instead of lagging behind
                    pan_orbit.focus = earth;
                    pan_orbit.target_focus = earth;
                    pan_orbit.force_update = true;
                }
            }
            CameraMode::SurfaceObserver { .. } => {
                if entered {
                    pan_orbit.enabled = false;
                }
            }
        }
    }
}

fn sync_near_clip(
    mode: Res<CameraMode>,
    scale: Res<ScaleSettings>,
    mut projections: Query<&mut Projection, With<MainCamera>>,
) {
    if !mode.is_changed() && !scale.is_changed() {
        return;
    }
    let near = near_clip(mode.is_surface(), &scale);
    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = &mut *projection
            && perspective.near != near
        {
            perspective.near = near;
        }
    }
}

fn apply_surface_observer(
    mode: Res<CameraMode>,
    site: Res<ObserverSite>,
    snapshot: Res<LatestSnapshot>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let CameraMode::SurfaceObserver {
        yaw_offset,
        pitch_offset,
    } = *mode
    else {
        return;
    };
    let Some(snapshot) = snapshot.get() else {
        return;
    };

    let pose = surface_observer_pose(
        site.0,
        yaw_offset,
        pitch_offset,
        snapshot.earth_position,
        snapshot.earth_orientation,
        &snapshot.scale,
    );
    let forward = world_to_bevy(pose.forward);
    let up = world_to_bevy(pose.up);

    for mut transform in &mut cameras {
        *transform = Transform::from_translation(world_to_bevy(pose.position)).looking_to(forward, up);
    }
}
