//! Camera mode state machine

use std::f64::consts::FRAC_PI_2;

use bevy::prelude::*;

/// Yaw/pitch rate while a direction key is held, radians per second.
pub const LOOK_RATE_RAD_PER_SEC: f64 = 0.6;

/// Pitch stays this far from straight up/down so forward never aligns with local up.
pub const PITCH_LIMIT_RAD: f64 = FRAC_PI_2 - 0.01;

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub enum CameraMode {
    /// Orbit around the Sun at the origin.
    #[default]
    OrbitTarget,
    /// Orbit around Earth's current position.
    FollowTarget,
    /// Ride on Earth's surface at the observer site.
    SurfaceObserver { yaw_offset: f64, pitch_offset: f64 },
}

impl CameraMode {
    /// Next mode in the cycle. Surface mode always starts looking due east at the horizon.
    pub fn cycle(self) -> Self {
        match self {
            CameraMode::OrbitTarget => CameraMode::FollowTarget,
            CameraMode::FollowTarget => CameraMode::SurfaceObserver {
                yaw_offset: 0.0,
                pitch_offset: 0.0,
            },
            CameraMode::SurfaceObserver { .. } => CameraMode::OrbitTarget,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CameraMode::OrbitTarget => "orbit",
            CameraMode::FollowTarget => "follow Earth",
            CameraMode::SurfaceObserver { .. } => "surface observer",
        }
    }

    pub fn is_surface(&self) -> bool {
        matches!(self, CameraMode::SurfaceObserver { .. })
    }

    /// Apply `dt` seconds of held directional input. No effect outside surface mode.
    pub fn apply_input(&mut self, input: DirectionalInput, dt: f64) {
        if let CameraMode::SurfaceObserver {
            yaw_offset,
            pitch_offset,
        } = self
        {
            let step = LOOK_RATE_RAD_PER_SEC * dt;
            *yaw_offset += input.yaw_axis() * step;
            *pitch_offset =
                (*pitch_offset + input.pitch_axis() * step).clamp(-PITCH_LIMIT_RAD, PITCH_LIMIT_RAD);
        }
    }
}

/// Directional intents held this frame.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionalInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionalInput {
    pub fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        Self {
            left: keys.pressed(KeyCode::ArrowLeft),
            right: keys.pressed(KeyCode::ArrowRight),
            up: keys.pressed(KeyCode::ArrowUp),
            down: keys.pressed(KeyCode::ArrowDown),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.yaw_axis() == 0.0 && self.pitch_axis() == 0.0
    }

    /// +1 turning right, -1 turning left.
    pub fn yaw_axis(&self) -> f64 {
        axis(self.right, self.left)
    }

    /// +1 looking up, -1 looking down.
    pub fn pitch_axis(&self) -> f64 {
        axis(self.up, self.down)
    }
}

fn axis(positive: bool, negative: bool) -> f64 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}
