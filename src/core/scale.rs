//! Scene scale presets
//!
//! Scale only changes the multipliers applied to distances and sizes, never the angles.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::coordinates::{AU_KM, EARTH_RADIUS_KM};

/// Moon radius relative to Earth radius.
pub const MOON_TO_EARTH_RADIUS: f64 = 1737.4 / EARTH_RADIUS_KM;

/// Marker/observer height factor above the Earth's surface.
pub const SURFACE_LIFT: f64 = 1.001;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    #[default]
    Aesthetic,
    ToScale,
}

impl ScaleMode {
    pub fn toggled(self) -> Self {
        match self {
            ScaleMode::Aesthetic => ScaleMode::ToScale,
            ScaleMode::ToScale => ScaleMode::Aesthetic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScaleMode::Aesthetic => "aesthetic",
            ScaleMode::ToScale => "to-scale",
        }
    }
}

/// Active scale multipliers, threaded explicitly through every position computation.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ScaleSettings {
    pub mode: ScaleMode,
    /// Scene units per astronomical unit of heliocentric distance.
    pub distance_scale: f64,
    /// Rendered Earth radius in scene units.
    pub size_scale: f64,
    /// Rendered Sun radius in scene units.
    pub sun_radius: f64,
    /// Scene units per Earth radius of geocentric lunar distance.
    pub moon_range_scale: f64,
}

impl ScaleSettings {
    pub fn for_mode(mode: ScaleMode) -> Self {
        match mode {
            ScaleMode::Aesthetic => Self {
                mode,
                distance_scale: 500.0,
                size_scale: 10.0,
                sun_radius: 50.0,
                moon_range_scale: 1.0,
            },
            ScaleMode::ToScale => Self {
                mode,
                distance_scale: AU_KM / EARTH_RADIUS_KM,
                size_scale: 1.0,
                sun_radius: 109.0,
                moon_range_scale: 1.0,
            },
        }
    }

    pub fn earth_radius(&self) -> f64 {
        self.size_scale
    }

    pub fn moon_radius(&self) -> f64 {
        self.size_scale * MOON_TO_EARTH_RADIUS
    }

    /// Radius at which surface markers and the surface observer sit.
    pub fn surface_radius(&self) -> f64 {
        self.size_scale * SURFACE_LIFT
    }

    /// Scene distance for a heliocentric range in AU.
    pub fn heliocentric_units(&self, range_au: f64) -> f64 {
        range_au * self.distance_scale
    }

    /// Scene distance for a geocentric lunar range expressed in Earth radii.
    pub fn lunar_units(&self, range_earth_radii: f64) -> f64 {
        range_earth_radii * self.moon_range_scale
    }
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self::for_mode(ScaleMode::default())
    }
}
