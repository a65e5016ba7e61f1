//! Construction geometry drawn with gizmos.
//!
//! The orbit path is always drawn. Everything else follows `UiState::show_geometry`.

use bevy::color::palettes::css;
use bevy::math::{DVec3, Isometry3d};
use bevy::prelude::*;

use crate::core::space::world_to_bevy;
use crate::orbital::{LatestSnapshot, OrbitPathCache};
use crate::ui::UiState;

/// Equinox and solstice directions of Earth's heliocentric position, world frame.
///
/// Earth sits on +X at the September equinox, +Y at the December solstice and so on.
pub fn key_points(distance_scale: f64) -> [(&'static str, DVec3); 4] {
    [
        ("september equinox", DVec3::X * distance_scale),
        ("december solstice", DVec3::Y * distance_scale),
        ("march equinox", -DVec3::X * distance_scale),
        ("june solstice", -DVec3::Y * distance_scale),
    ]
}

pub fn draw_orbit_path(mut gizmos: Gizmos, cache: Res<OrbitPathCache>) {
    let samples = cache.samples();
    if samples.len() < 2 {
        return;
    }
    gizmos.linestrip(
        samples.iter().map(|p| world_to_bevy(*p)),
        css::STEEL_BLUE,
    );
}

pub fn draw_construction_geometry(
    mut gizmos: Gizmos,
    ui: Res<UiState>,
    snapshot: Res<LatestSnapshot>,
) {
    if !ui.show_geometry {
        return;
    }
    let Some(s) = snapshot.get() else {
        return;
    };

    let earth = world_to_bevy(s.earth_position);
    let moon = world_to_bevy(s.moon_position);
    let earth_radius = s.scale.earth_radius() as f32;

    // World axes at the Sun
    let axis_len = (s.scale.sun_radius * 2.0) as f32;
    gizmos.arrow(Vec3::ZERO, world_to_bevy(DVec3::X) * axis_len, css::RED);
    gizmos.arrow(Vec3::ZERO, world_to_bevy(DVec3::Y) * axis_len, css::LIME);
    gizmos.arrow(Vec3::ZERO, world_to_bevy(DVec3::Z) * axis_len, css::BLUE);

    gizmos.line(Vec3::ZERO, earth, css::GOLD);
    gizmos.line(earth, moon, css::SILVER);

    // Earth body axes, the first one being the spin axis
    for (local, color) in [
        (DVec3::Y, css::WHITE),
        (DVec3::X, css::ORANGE_RED),
        (DVec3::Z, css::AQUA),
    ] {
        let tip = world_to_bevy(s.earth_orientation * local) * earth_radius * 1.6;
        gizmos.line(earth - tip, earth + tip, color);
    }

    for (_, point) in key_points(s.scale.distance_scale) {
        gizmos.sphere(
            Isometry3d::from_translation(world_to_bevy(point)),
            earth_radius * 0.5,
            css::DARK_GRAY,
        );
    }

    let marker_radius = earth_radius * 0.04;
    gizmos.sphere(
        Isometry3d::from_translation(world_to_bevy(
            s.earth_local_to_world(s.subsolar_marker_local),
        )),
        marker_radius,
        css::YELLOW,
    );
    gizmos.sphere(
        Isometry3d::from_translation(world_to_bevy(
            s.earth_local_to_world(s.sublunar_marker_local),
        )),
        marker_radius,
        css::LIGHT_GRAY,
    );
}
