//! Keyboard control surface
//!
//! Space pause/resume, 1-4 speed presets, M scale mode, C camera mode, N reset to now,
//! G construction geometry, H heads-up display.

use bevy::prelude::*;

use crate::camera::CameraMode;
use crate::core::scale::ScaleSettings;
use crate::orbital::time::{SPEED_PRESETS, SimulationClock};
use crate::ui::state::UiState;

/// One discrete action from the control surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    TogglePause,
    SetSpeed(f64),
    ToggleScale,
    CycleCamera,
    ResetToNow,
    ToggleGeometry,
    ToggleHud,
}

const SPEED_KEYS: [KeyCode; 4] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

/// Actions whose keys went down this frame.
pub fn actions_from_keys(keys: &ButtonInput<KeyCode>) -> Vec<ControlAction> {
    let mut actions = Vec::new();
    if keys.just_pressed(KeyCode::Space) {
        actions.push(ControlAction::TogglePause);
    }
    for (key, speed) in SPEED_KEYS.iter().zip(SPEED_PRESETS) {
        if keys.just_pressed(*key) {
            actions.push(ControlAction::SetSpeed(speed));
        }
    }
    if keys.just_pressed(KeyCode::KeyM) {
        actions.push(ControlAction::ToggleScale);
    }
    if keys.just_pressed(KeyCode::KeyC) {
        actions.push(ControlAction::CycleCamera);
    }
    if keys.just_pressed(KeyCode::KeyN) {
        actions.push(ControlAction::ResetToNow);
    }
    if keys.just_pressed(KeyCode::KeyG) {
        actions.push(ControlAction::ToggleGeometry);
    }
    if keys.just_pressed(KeyCode::KeyH) {
        actions.push(ControlAction::ToggleHud);
    }
    actions
}

/// Apply keyboard actions before the clock runs, so this frame's snapshot already reflects them.
pub fn handle_keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut clock: ResMut<SimulationClock>,
    mut scale: ResMut<ScaleSettings>,
    mut mode: ResMut<CameraMode>,
    mut ui: ResMut<UiState>,
) {
    for action in actions_from_keys(&keys) {
        match action {
            ControlAction::TogglePause => {
                let paused = clock.toggle_pause();
                info!("Simulation {}", if paused { "paused" } else { "resumed" });
            }
            ControlAction::SetSpeed(speed) => match clock.set_speed_multiplier(speed) {
                Ok(()) => info!("Speed set to {speed}x"),
                Err(err) => warn!("{err:#}"),
            },
            ControlAction::ToggleScale => {
                *scale = ScaleSettings::for_mode(scale.mode.toggled());
                info!("Scale mode: {}", scale.mode.label());
            }
            ControlAction::CycleCamera => {
                *mode = mode.cycle();
                info!("Camera mode: {}", mode.label());
            }
            ControlAction::ResetToNow => {
                clock.reset_to_now();
                info!("Simulation time reset to now");
            }
            ControlAction::ToggleGeometry => ui.show_geometry = !ui.show_geometry,
            ControlAction::ToggleHud => ui.show_hud = !ui.show_hud,
        }
    }
}
