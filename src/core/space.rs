//! Boundary between the ecliptic world frame and Bevy's render frame.
//!
//! World frame: heliocentric J2000 ecliptic, +Z = ecliptic north, f64.
//! Render frame: Bevy, +Y up, f32.
//! Mapping: Bevy (x,y,z) = (world.y, world.z, world.x), a proper rotation, so quaternions map
//! component-wise the same way.

use bevy::math::{DQuat, DVec3, Quat, Vec3};

/// Convert a world-frame vector to Bevy render coordinates.
pub fn world_to_bevy(world: DVec3) -> Vec3 {
    Vec3::new(world.y as f32, world.z as f32, world.x as f32)
}

/// Convert a world-frame rotation to the equivalent Bevy rotation.
pub fn world_rotation_to_bevy(q: DQuat) -> Quat {
    Quat::from_xyzw(q.y as f32, q.z as f32, q.x as f32, q.w as f32).normalize()
}
