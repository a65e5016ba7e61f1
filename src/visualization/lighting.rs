//! Lighting configuration systems

use bevy::prelude::*;

use crate::core::space::world_to_bevy;
use crate::orbital::LatestSnapshot;

/// Marker component for the sun directional light
#[derive(Component)]
pub struct SunLight;

pub fn spawn_sun_light(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        SunLight,
        Transform::default(),
        Name::new("Sun light"),
    ));
}

/// Aim the sun light from the origin at Earth
pub fn update_sun_light_direction(
    snapshot: Res<LatestSnapshot>,
    mut lights: Query<&mut Transform, With<SunLight>>,
) {
    if !snapshot.is_changed() {
        return;
    }
    let Some(s) = snapshot.get() else {
        return;
    };

    let dir = world_to_bevy(-s.sun_direction_from_earth());
    if dir.length_squared() == 0.0 {
        return;
    }
    // Light travels along its -Z axis, so look from the Sun toward Earth
    let up = if dir.y.abs() > 0.99 { Vec3::X } else { Vec3::Y };
    for mut transform in lights.iter_mut() {
        *transform = Transform::IDENTITY.looking_to(dir, up);
    }
}
