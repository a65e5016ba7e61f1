//! User configuration
//!
//! Read once at startup from `config.json` in the platform config directory. Every field is
//! optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::coordinates::GeographicPoint;
use crate::core::scale::ScaleMode;
use crate::core::sidereal::julian_date_utc;
use crate::orbital::orbit_path::DEFAULT_WINDOW_RADIUS_DAYS;
use crate::orbital::time::{SPEED_PRESETS, SimulationClock};

const CONFIG_FILE: &str = "config.json";

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial simulated time; `None` starts at the wall clock.
    pub start_utc: Option<DateTime<Utc>>,
    pub scale_mode: ScaleMode,
    pub speed_multiplier: f64,
    pub sample_interval_secs: f64,
    pub observer_lat_deg: f64,
    /// Degrees west of Greenwich.
    pub observer_lon_deg: f64,
    pub orbit_window_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_utc: None,
            scale_mode: ScaleMode::Aesthetic,
            speed_multiplier: 1.0,
            sample_interval_secs: 1.0,
            observer_lat_deg: 41.0,
            observer_lon_deg: 71.0,
            orbit_window_days: DEFAULT_WINDOW_RADIUS_DAYS,
        }
    }
}

impl AppConfig {
    /// Location of the config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "orrery").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the platform config directory, logging and falling back to defaults on error.
    ///
    /// Call after the log plugin is built so the fallback warnings reach the subscriber.
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from_or_default(&path),
            None => Self::default(),
        }
    }

    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|err| {
            error!("{err:#}; using default configuration");
            Self::default()
        })
    }

    /// Load from `path`. A missing file yields defaults; unreadable or malformed JSON is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Replace out-of-range values with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !SPEED_PRESETS.contains(&self.speed_multiplier) {
            warn!(
                "Config speed_multiplier {} not in {:?}; using {}",
                self.speed_multiplier, SPEED_PRESETS, defaults.speed_multiplier
            );
            self.speed_multiplier = defaults.speed_multiplier;
        }
        if !SimulationClock::is_valid_interval(self.sample_interval_secs) {
            warn!(
                "Config sample_interval_secs {} invalid; using {}",
                self.sample_interval_secs, defaults.sample_interval_secs
            );
            self.sample_interval_secs = defaults.sample_interval_secs;
        }
        if !(self.observer_lat_deg.is_finite() && self.observer_lon_deg.is_finite()) {
            warn!("Config observer location invalid; using default site");
            self.observer_lat_deg = defaults.observer_lat_deg;
            self.observer_lon_deg = defaults.observer_lon_deg;
        }
        if self.orbit_window_days == 0 {
            self.orbit_window_days = defaults.orbit_window_days;
        }
        self
    }

    pub fn start_jd(&self) -> f64 {
        julian_date_utc(self.start_utc.unwrap_or_else(Utc::now))
    }

    pub fn observer_site(&self) -> GeographicPoint {
        GeographicPoint::from_degrees(self.observer_lat_deg, self.observer_lon_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scratch_file(name: &str, contents: Option<&str>) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("orrery-config-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        let _ = fs::remove_file(&path);
        if let Some(text) = contents {
            fs::write(&path, text).unwrap();
        }
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = scratch_file("missing", None);
        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch_file(
            "partial",
            Some(r#"{ "scale_mode": "to_scale", "start_utc": "2024-04-08T19:00:00Z" }"#),
        );
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.scale_mode, ScaleMode::ToScale);
        assert_eq!(
            config.start_utc,
            Some(Utc.with_ymd_and_hms(2024, 4, 8, 19, 0, 0).unwrap())
        );
        assert_eq!(config.orbit_window_days, 182);
        assert_eq!(config.observer_lat_deg, 41.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = scratch_file("malformed", Some("{ not json"));
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = scratch_file("malformed-default", Some(r#"{ "scale_mode": 12 "#));
        assert_eq!(AppConfig::load_from_or_default(&path), AppConfig::default());

        let path = scratch_file("valid-default", Some(r#"{ "observer_lat_deg": -33.9 }"#));
        assert_eq!(AppConfig::load_from_or_default(&path).observer_lat_deg, -33.9);
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let path = scratch_file(
            "ranges",
            Some(r#"{ "speed_multiplier": 3.0, "sample_interval_secs": -2.0, "orbit_window_days": 0 }"#),
        );
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.speed_multiplier, 1.0);
        assert_eq!(config.sample_interval_secs, 1.0);
        assert_eq!(config.orbit_window_days, 182);
    }

    #[test]
    fn test_sub_millisecond_interval_falls_back() {
        let path = scratch_file("tiny-interval", Some(r#"{ "sample_interval_secs": 1e-10 }"#));
        assert_eq!(AppConfig::load_from(&path).unwrap().sample_interval_secs, 1.0);

        let path = scratch_file("paused", Some(r#"{ "sample_interval_secs": 0.0 }"#));
        assert_eq!(AppConfig::load_from(&path).unwrap().sample_interval_secs, 0.0);
    }

    #[test]
    fn test_start_jd_from_fixed_time() {
        let config = AppConfig {
            start_utc: Some(Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap()),
            ..AppConfig::default()
        };
        assert!((config.start_jd() - 2451545.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_observer_site() {
        let (lat, lon) = AppConfig::default().observer_site().as_degrees();
        assert!((lat - 41.0).abs() < 1e-9);
        assert!((lon - 71.0).abs() < 1e-9);
    }
}
