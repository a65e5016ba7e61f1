//! UI state management

use bevy::prelude::*;

/// Display toggles owned by the control surface
#[derive(Resource, Debug)]
pub struct UiState {
    /// Axes, connecting lines, key points and surface markers.
    pub show_geometry: bool,
    pub show_hud: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_geometry: true,
            show_hud: true,
        }
    }
}
