//! Surface observer pose.
//!
//! The observer stands at a geographic site just above Earth's surface. Its view starts from
//! the local East-North-Up basis, carried along by Earth's orientation, then turned by the
//! accumulated yaw (about local up) and pitch (about the camera's right axis).

use bevy::math::{DQuat, DVec3};

use crate::core::coordinates::{GeographicPoint, local_north_east};
use crate::core::scale::ScaleSettings;

/// Near clip plane for the orbit and follow views.
pub const ORBIT_NEAR_CLIP: f32 = 0.1;

/// Near clip plane for the current view. The surface observer stands only slightly above the
/// ground, so its near plane has to sit well inside that height.
pub fn near_clip(surface: bool, scale: &ScaleSettings) -> f32 {
    if surface {
        ((scale.surface_radius() - scale.earth_radius()) * 0.1) as f32
    } else {
        ORBIT_NEAR_CLIP
    }
}

/// World-frame camera pose. The basis vectors are orthonormal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverPose {
    pub position: DVec3,
    pub forward: DVec3,
    pub right: DVec3,
    pub up: DVec3,
}

/// Pose of an observer at `site` looking `yaw` radians right of east and `pitch` above the
/// horizon. Sites at the poles are nudged off the pole first.
pub fn surface_observer_pose(
    site: GeographicPoint,
    yaw: f64,
    pitch: f64,
    earth_position: DVec3,
    earth_orientation: DQuat,
    scale: &ScaleSettings,
) -> ObserverPose {
    let site = site.off_pole();
    let (_, east) = local_north_east(site);

    let local_up = earth_orientation * site.to_local(1.0);
    let east = earth_orientation * east;

    let turned = DQuat::from_axis_angle(local_up, -yaw) * east;
    let right = turned.cross(local_up).normalize();
    let forward = (DQuat::from_axis_angle(right, pitch) * turned).normalize();
    let up = right.cross(forward).normalize();

    ObserverPose {
        position: earth_position + earth_orientation * site.to_local(scale.surface_radius()),
        forward,
        right,
        up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scale::ScaleMode;
    use crate::orbital::orientation::EarthOrientationSolver;
    use std::f64::consts::FRAC_PI_2;

    fn earth() -> (DVec3, DQuat) {
        let solver = EarthOrientationSolver::new();
        let position = DVec3::new(-300.0, 400.0, 0.0);
        let subsolar = GeographicPoint::from_degrees(12.0, -40.0);
        (position, solver.orient_subpoint(subsolar, position).rotation)
    }

    fn assert_orthonormal(p: &ObserverPose) {
        for v in [p.forward, p.right, p.up] {
            assert!((v.length() - 1.0).abs() < 1e-9);
        }
        assert!(p.forward.dot(p.right).abs() < 1e-9);
        assert!(p.forward.dot(p.up).abs() < 1e-9);
        assert!(p.right.dot(p.up).abs() < 1e-9);
    }

    #[test]
    fn test_position_sits_above_surface() {
        let (pos, rot) = earth();
        let scale = ScaleSettings::default();
        let p = surface_observer_pose(
            GeographicPoint::from_degrees(41.0, 71.0),
            0.3,
            -0.2,
            pos,
            rot,
            &scale,
        );
        assert!(((p.position - pos).length() - scale.surface_radius()).abs() < 1e-9);
        assert_orthonormal(&p);
    }

    #[test]
    fn test_level_view_looks_east_along_horizon() {
        let (pos, rot) = earth();
        let scale = ScaleSettings::default();
        let site = GeographicPoint::from_degrees(41.0, 71.0);
        let p = surface_observer_pose(site, 0.0, 0.0, pos, rot, &scale);

        let radial = (p.position - pos).normalize();
        let (north, east) = local_north_east(site);
        assert!(p.forward.dot(rot * east) > 1.0 - 1e-9);
        assert!(p.forward.dot(radial).abs() < 1e-9);
        assert!(p.up.dot(radial) > 1.0 - 1e-9);
        // Right of east is south
        assert!(p.right.dot(rot * north) < -1.0 + 1e-9);
    }

    #[test]
    fn test_positive_offsets_turn_right_and_look_up() {
        let (pos, rot) = earth();
        let scale = ScaleSettings::default();
        let site = GeographicPoint::from_degrees(-20.0, 150.0);
        let (north, _) = local_north_east(site);
        let radial = rot * site.to_local(1.0);

        let p = surface_observer_pose(site, 0.4, 0.25, pos, rot, &scale);
        assert!(p.forward.dot(rot * north) < 0.0);
        assert!((p.forward.dot(radial) - 0.25_f64.sin()).abs() < 1e-9);
        assert_orthonormal(&p);
    }

    #[test]
    fn test_pole_site_gives_finite_basis() {
        let (pos, rot) = earth();
        let scale = ScaleSettings::default();
        for lat in [FRAC_PI_2, -FRAC_PI_2] {
            let p = surface_observer_pose(
                GeographicPoint::new(lat, 0.0),
                1.0,
                0.5,
                pos,
                rot,
                &scale,
            );
            assert!(p.forward.is_finite() && p.right.is_finite() && p.up.is_finite());
            assert_orthonormal(&p);
        }
    }

    #[test]
    fn test_surface_near_clip_below_observer_height() {
        for mode in [ScaleMode::Aesthetic, ScaleMode::ToScale] {
            let scale = ScaleSettings::for_mode(mode);
            let height = (scale.surface_radius() - scale.earth_radius()) as f32;
            let near = near_clip(true, &scale);
            assert!(near > 0.0 && near < height, "{mode:?}: near {near} height {height}");
        }
        assert_eq!(near_clip(false, &ScaleSettings::default()), ORBIT_NEAR_CLIP);
    }
}
