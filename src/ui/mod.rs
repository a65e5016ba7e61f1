//! User interface module
//!
//! Keyboard control surface and the text HUD.

use bevy::prelude::*;

pub mod controls;
pub mod hud;
pub mod state;

pub use state::UiState;

use crate::orbital::SimulationSet;

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .add_systems(Startup, hud::spawn_hud)
            .add_systems(
                Update,
                (
                    controls::handle_keyboard_controls.before(SimulationSet::Clock),
                    hud::update_hud.after(SimulationSet::OrbitPath),
                ),
            );
    }
}
