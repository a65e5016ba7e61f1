//! Earth orientation from the subsolar point.
//!
//! Earth's orientation is split into a constant base rotation (frame alignment + axial tilt)
//! and a spin about the polar axis. The spin is solved each time so that the computed subsolar
//! point faces the true Sun direction. No sidereal rotation model is integrated separately,
//! so lighting and the subsolar marker can never disagree.
//!
//! Caller contract: `earth_world_position` must come from the same Julian Date passed to
//! [`EarthOrientationSolver::solve`]. A stale position produces a visibly wrong spin and is not
//! detected here.

use bevy::math::{DQuat, DVec3};
use bevy::prelude::*;

use crate::core::coordinates::GeographicPoint;
use crate::orbital::ephemeris::Ephemeris;
use crate::orbital::subpoint::subsolar_point;

/// Axial tilt applied about the ecliptic X axis, degrees.
pub const AXIAL_TILT_DEG: f64 = 23.44;

/// Below this, a projected direction is treated as lying on the spin axis.
const AXIS_EPSILON: f64 = 1e-12;

/// Result of one orientation solve.
#[derive(Clone, Copy, Debug)]
pub struct EarthOrientation {
    /// Body-local to world rotation.
    pub rotation: DQuat,
    /// Spin angle about the polar axis, radians.
    pub spin_angle: f64,
    /// Subsolar point used for the solve.
    pub subsolar: GeographicPoint,
}

/// Solver holding the memoized base orientation and spin axis.
#[derive(Resource, Clone, Copy, Debug)]
pub struct EarthOrientationSolver {
    base: DQuat,
    spin_axis: DVec3,
}

impl Default for EarthOrientationSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EarthOrientationSolver {
    pub fn new() -> Self {
        // Body-local +Y (north pole) onto world +Z, then tilt about ecliptic X
        let frame_alignment = DQuat::from_rotation_x(std::f64::consts::FRAC_PI_2);
        let tilt = DQuat::from_rotation_x(-AXIAL_TILT_DEG.to_radians());
        let base = (tilt * frame_alignment).normalize();
        let spin_axis = (base * DVec3::Y).normalize();
        Self { base, spin_axis }
    }

    pub fn base(&self) -> DQuat {
        self.base
    }

    /// North polar axis in world space.
    pub fn spin_axis(&self) -> DVec3 {
        self.spin_axis
    }

    /// Solve Earth's orientation at `jd` for an Earth placed at `earth_world_position`
    /// (Sun at the world origin).
    pub fn solve(
        &self,
        jd: f64,
        earth_world_position: DVec3,
        ephemeris: &dyn Ephemeris,
    ) -> anyhow::Result<EarthOrientation> {
        let subsolar = subsolar_point(jd, ephemeris)?;
        Ok(self.orient_subpoint(subsolar, earth_world_position))
    }

    /// Orientation that turns `subsolar` toward the Sun as seen from `earth_world_position`.
    pub fn orient_subpoint(
        &self,
        subsolar: GeographicPoint,
        earth_world_position: DVec3,
    ) -> EarthOrientation {
        let unspun = self.base * subsolar.to_local(1.0);
        let sun_direction = (-earth_world_position).normalize_or_zero();

        let spin_angle = signed_angle_about(unspun, sun_direction, self.spin_axis);
        let spin = DQuat::from_axis_angle(self.spin_axis, spin_angle);

        EarthOrientation {
            rotation: (spin * self.base).normalize(),
            spin_angle,
            subsolar,
        }
    }
}

/// Signed angle rotating `from` onto `to` about `axis`, after projecting both onto the plane
/// perpendicular to `axis`. Zero when either projection vanishes.
pub fn signed_angle_about(from: DVec3, to: DVec3, axis: DVec3) -> f64 {
    let from_p = from - axis * from.dot(axis);
    let to_p = to - axis * to.dot(axis);
    if from_p.length_squared() < AXIS_EPSILON || to_p.length_squared() < AXIS_EPSILON {
        return 0.0;
    }
    let from_p = from_p.normalize();
    let to_p = to_p.normalize();

    let angle = from_p.dot(to_p).clamp(-1.0, 1.0).acos();
    if from_p.cross(to_p).dot(axis) >= 0.0 {
        angle
    } else {
        -angle
    }
}
