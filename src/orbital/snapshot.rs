//! Per-time scene snapshot
//!
//! Everything the renderer and camera need for one simulated instant is computed here, once,
//! and published whole. Consumers never recompute positions or orientation themselves.

use anyhow::Context;
use bevy::math::{DQuat, DVec3};
use bevy::prelude::*;

use crate::core::coordinates::{GeographicPoint, spherical_to_cartesian};
use crate::core::scale::ScaleSettings;
use crate::orbital::ephemeris::{Body, Ephemeris, EphemerisSource};
use crate::orbital::orientation::EarthOrientationSolver;
use crate::orbital::subpoint::{Sublunar, sublunar_point};
use crate::orbital::time::SimulationClock;

/// Immutable geometry for one Julian Date, in the world frame.
#[derive(Clone, Copy, Debug)]
pub struct CelestialSnapshot {
    pub jd: f64,
    pub scale: ScaleSettings,
    pub earth_position: DVec3,
    /// Earth body-local to world rotation.
    pub earth_orientation: DQuat,
    pub moon_position: DVec3,
    pub subsolar: GeographicPoint,
    pub sublunar: Sublunar,
    /// Marker positions in Earth's body-local frame.
    pub subsolar_marker_local: DVec3,
    pub sublunar_marker_local: DVec3,
    /// Earth-Moon distance in scene units.
    pub sublunar_range_units: f64,
}

impl CelestialSnapshot {
    /// Body-local point on or above Earth mapped into the world frame.
    pub fn earth_local_to_world(&self, local: DVec3) -> DVec3 {
        self.earth_position + self.earth_orientation * local
    }

    pub fn sun_direction_from_earth(&self) -> DVec3 {
        (-self.earth_position).normalize_or_zero()
    }
}

/// Compute the snapshot for `jd`. Any ephemeris failure aborts the whole snapshot.
pub fn compute_snapshot(
    jd: f64,
    ephemeris: &dyn Ephemeris,
    scale: &ScaleSettings,
    solver: &EarthOrientationSolver,
) -> anyhow::Result<CelestialSnapshot> {
    let earth = ephemeris
        .position(Body::Earth, jd)
        .context("Earth position")?;
    let earth_position = spherical_to_cartesian(
        earth.longitude,
        earth.latitude,
        scale.heliocentric_units(earth.range),
    );

    // Same jd for position and orientation
    let orientation = solver.solve(jd, earth_position, ephemeris)?;
    let sublunar = sublunar_point(jd, ephemeris)?;
    let sublunar_range_units = scale.lunar_units(sublunar.range_earth_radii);

    let moon_position =
        earth_position + orientation.rotation * sublunar.point.to_local(sublunar_range_units);

    Ok(CelestialSnapshot {
        jd,
        scale: *scale,
        earth_position,
        earth_orientation: orientation.rotation,
        moon_position,
        subsolar: orientation.subsolar,
        sublunar,
        subsolar_marker_local: orientation.subsolar.to_local(scale.surface_radius()),
        sublunar_marker_local: sublunar.point.to_local(scale.surface_radius()),
        sublunar_range_units,
    })
}

/// Most recent successfully computed snapshot.
#[derive(Resource, Default, Debug)]
pub struct LatestSnapshot(pub Option<CelestialSnapshot>);

impl LatestSnapshot {
    pub fn get(&self) -> Option<&CelestialSnapshot> {
        self.0.as_ref()
    }
}

/// Recompute the snapshot when the clock or scale changed.
///
/// Runs once per frame after the clock, however many ticks landed. On failure the previous
/// snapshot stays in place so nothing half-updated reaches the renderer.
pub fn update_snapshot(
    clock: Res<SimulationClock>,
    scale: Res<ScaleSettings>,
    source: Res<EphemerisSource>,
    solver: Res<EarthOrientationSolver>,
    mut latest: ResMut<LatestSnapshot>,
) {
    if latest.0.is_some() && !clock.is_changed() && !scale.is_changed() {
        return;
    }
    match compute_snapshot(clock.current_jd(), source.as_dyn(), &scale, &solver) {
        Ok(snapshot) => latest.0 = Some(snapshot),
        Err(err) => warn!(
            "Skipping scene update at JD {:.5}: {err:#}",
            clock.current_jd()
        ),
    }
}
