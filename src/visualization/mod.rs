//! Visualization module
//!
//! Thin renderer: it only reads `LatestSnapshot` and `OrbitPathCache` and maps them into
//! Bevy's render frame.

use bevy::prelude::*;

pub mod bodies;
pub mod geometry;
pub mod lighting;

use crate::orbital::SimulationSet;

/// Plugin for visualization systems
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (bodies::spawn_bodies, lighting::spawn_sun_light),
        )
        .add_systems(
            Update,
            (
                bodies::apply_snapshot_to_bodies,
                lighting::update_sun_light_direction,
                geometry::draw_orbit_path,
                geometry::draw_construction_geometry,
            )
                .after(SimulationSet::OrbitPath),
        );
    }
}
