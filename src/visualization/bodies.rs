//! Sun, Earth and Moon meshes driven by the latest snapshot.

use bevy::prelude::*;

use crate::core::space::{world_rotation_to_bevy, world_to_bevy};
use crate::orbital::LatestSnapshot;

#[derive(Component)]
pub struct Sun;

#[derive(Component)]
pub struct Earth;

#[derive(Component)]
pub struct Moon;

pub fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(sphere) = Sphere::new(1.0).mesh().ico(5) else {
        warn!("Failed to build body mesh");
        return;
    };
    let sphere = meshes.add(sphere);

    commands.spawn((
        Mesh3d(sphere.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.85, 0.4),
            emissive: LinearRgba::rgb(8.0, 6.0, 2.0),
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Sun,
        Name::new("Sun"),
    ));

    commands.spawn((
        Mesh3d(sphere.clone()),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.45, 0.9),
            perceptual_roughness: 0.8,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
        Earth,
        Name::new("Earth"),
    ));

    commands.spawn((
        Mesh3d(sphere),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.7, 0.7, 0.7),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
        Moon,
        Name::new("Moon"),
    ));
}

/// Copy the latest snapshot onto the body transforms.
#[allow(clippy::type_complexity)]
pub fn apply_snapshot_to_bodies(
    snapshot: Res<LatestSnapshot>,
    mut sun: Query<&mut Transform, (With<Sun>, Without<Earth>, Without<Moon>)>,
    mut earth: Query<(&mut Transform, &mut Visibility), (With<Earth>, Without<Moon>)>,
    mut moon: Query<(&mut Transform, &mut Visibility), (With<Moon>, Without<Earth>)>,
) {
    if !snapshot.is_changed() {
        return;
    }
    let Some(s) = snapshot.get() else {
        return;
    };

    for mut transform in &mut sun {
        transform.scale = Vec3::splat(s.scale.sun_radius as f32);
    }
    for (mut transform, mut visibility) in &mut earth {
        transform.translation = world_to_bevy(s.earth_position);
        transform.rotation = world_rotation_to_bevy(s.earth_orientation);
        transform.scale = Vec3::splat(s.scale.earth_radius() as f32);
        *visibility = Visibility::Visible;
    }
    for (mut transform, mut visibility) in &mut moon {
        transform.translation = world_to_bevy(s.moon_position);
        transform.scale = Vec3::splat(s.scale.moon_radius() as f32);
        // Tidal lock: face Earth
        transform.look_at(world_to_bevy(s.earth_position), Vec3::Y);
        *visibility = Visibility::Visible;
    }
}
