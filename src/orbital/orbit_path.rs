//! Cached Earth orbit path.
//!
//! Sampling the ephemeris a full year at a time is the most expensive thing the simulation
//! does, so the path is sampled once around an anchor time and reused until the simulated date
//! drifts more than `window_radius_days` away from it. The cache is rebuilt whole, never patched.

use anyhow::Context;
use bevy::math::DVec3;
use bevy::prelude::*;

use crate::core::coordinates::spherical_to_cartesian;
use crate::core::scale::ScaleSettings;
use crate::orbital::ephemeris::{Body, Ephemeris};

/// Default half-width of the sampled window: one sample per day over a full year.
pub const DEFAULT_WINDOW_RADIUS_DAYS: u32 = 182;

/// One sampled path.
#[derive(Clone, Debug)]
pub struct OrbitPath {
    pub anchor_jd: f64,
    /// Distance scale the samples were produced with.
    pub distance_scale: f64,
    /// World-frame positions at daily steps from `anchor_jd - window` to `anchor_jd + window`.
    pub samples: Vec<DVec3>,
}

#[derive(Resource, Debug)]
pub struct OrbitPathCache {
    window_radius_days: u32,
    path: Option<OrbitPath>,
}

impl Default for OrbitPathCache {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_RADIUS_DAYS)
    }
}

impl OrbitPathCache {
    pub fn new(window_radius_days: u32) -> Self {
        Self {
            window_radius_days,
            path: None,
        }
    }

    pub fn window_radius_days(&self) -> u32 {
        self.window_radius_days
    }

    pub fn path(&self) -> Option<&OrbitPath> {
        self.path.as_ref()
    }

    pub fn samples(&self) -> &[DVec3] {
        self.path.as_ref().map_or(&[], |p| p.samples.as_slice())
    }

    /// True when no path exists, the scale changed, or `current_jd` left the window.
    ///
    /// Drift exactly equal to the window radius keeps the cache.
    pub fn needs_resample(&self, current_jd: f64, scale: &ScaleSettings) -> bool {
        match &self.path {
            None => true,
            Some(path) => {
                path.distance_scale != scale.distance_scale
                    || (current_jd - path.anchor_jd).abs() > self.window_radius_days as f64
            }
        }
    }

    /// Make sure the cached path covers `current_jd`. Returns whether a resample happened.
    ///
    /// On an ephemeris failure the previous path is kept untouched.
    pub fn ensure_fresh(
        &mut self,
        current_jd: f64,
        ephemeris: &dyn Ephemeris,
        scale: &ScaleSettings,
    ) -> anyhow::Result<bool> {
        if !self.needs_resample(current_jd, scale) {
            return Ok(false);
        }
        self.path = Some(sample_orbit(
            current_jd,
            self.window_radius_days,
            ephemeris,
            scale,
        )?);
        Ok(true)
    }
}

/// Sample `2 * window_radius_days + 1` daily Earth positions centred on `anchor_jd`.
pub fn sample_orbit(
    anchor_jd: f64,
    window_radius_days: u32,
    ephemeris: &dyn Ephemeris,
    scale: &ScaleSettings,
) -> anyhow::Result<OrbitPath> {
    let start = anchor_jd - window_radius_days as f64;
    let count = 2 * window_radius_days as usize + 1;
    let samples = (0..count)
        .map(|i| {
            let jd = start + i as f64;
            let p = ephemeris
                .position(Body::Earth, jd)
                .with_context(|| format!("sampling orbit path at JD {jd}"))?;
            Ok(spherical_to_cartesian(
                p.longitude,
                p.latitude,
                scale.heliocentric_units(p.range),
            ))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(OrbitPath {
        anchor_jd,
        distance_scale: scale.distance_scale,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scale::ScaleMode;
    use crate::core::sidereal::J2000_JD;
    use crate::orbital::ephemeris::testing::CountingEphemeris;

    const T0: f64 = 2460409.0;

    fn primed(eph: &CountingEphemeris, scale: &ScaleSettings) -> OrbitPathCache {
        let mut cache = OrbitPathCache::new(182);
        assert!(cache.ensure_fresh(T0, eph, scale).unwrap());
        cache
    }

    #[test]
    fn test_first_call_samples_full_year() {
        let eph = CountingEphemeris::default();
        let scale = ScaleSettings::default();
        let cache = primed(&eph, &scale);
        assert_eq!(eph.calls(), 365);
        assert_eq!(cache.samples().len(), 365);
        assert_eq!(cache.path().unwrap().anchor_jd, T0);
    }

    #[test]
    fn test_within_window_does_not_resample() {
        let eph = CountingEphemeris::default();
        let scale = ScaleSettings::default();
        let mut cache = primed(&eph, &scale);

        assert!(!cache.ensure_fresh(T0 + 100.0, &eph, &scale).unwrap());
        assert_eq!(eph.calls(), 365);
        assert_eq!(cache.path().unwrap().anchor_jd, T0);
    }

    #[test]
    fn test_drift_beyond_window_resamples_at_new_anchor() {
        let eph = CountingEphemeris::default();
        let scale = ScaleSettings::default();
        let mut cache = primed(&eph, &scale);

        assert!(cache.ensure_fresh(T0 + 200.0, &eph, &scale).unwrap());
        assert_eq!(eph.calls(), 730);
        assert_eq!(cache.path().unwrap().anchor_jd, T0 + 200.0);
    }

    #[test]
    fn test_boundary_drift_keeps_cache() {
        let eph = CountingEphemeris::default();
        let scale = ScaleSettings::default();
        let mut cache = primed(&eph, &scale);

        assert!(!cache.ensure_fresh(T0 + 182.0, &eph, &scale).unwrap());
        assert!(!cache.ensure_fresh(T0 - 182.0, &eph, &scale).unwrap());
        assert!(cache.ensure_fresh(T0 - 182.5, &eph, &scale).unwrap());
    }

    #[test]
    fn test_scale_change_invalidates() {
        let eph = CountingEphemeris::default();
        let aesthetic = ScaleSettings::default();
        let mut cache = primed(&eph, &aesthetic);

        let to_scale = ScaleSettings::for_mode(ScaleMode::ToScale);
        assert!(cache.needs_resample(T0, &to_scale));
        assert!(cache.ensure_fresh(T0, &eph, &to_scale).unwrap());
        let r = cache.samples()[182].length();
        assert!((r / to_scale.distance_scale - 1.0).abs() < 0.02);
    }

    #[test]
    fn test_failure_keeps_previous_samples() {
        let eph = CountingEphemeris::default();
        let scale = ScaleSettings::default();
        let mut cache = primed(&eph, &scale);
        let before = cache.samples().to_vec();

        eph.set_failing(true);
        assert!(cache.ensure_fresh(T0 + 400.0, &eph, &scale).is_err());
        assert_eq!(cache.path().unwrap().anchor_jd, T0);
        assert_eq!(cache.samples(), before.as_slice());
    }

    #[test]
    fn test_samples_are_daily_and_centred() {
        let eph = CountingEphemeris::default();
        let scale = ScaleSettings::default();
        let path = sample_orbit(J2000_JD, 3, &eph, &scale).unwrap();
        assert_eq!(path.samples.len(), 7);

        let centre = crate::orbital::ephemeris::LowPrecisionEphemeris
            .position(Body::Earth, J2000_JD)
            .unwrap();
        let expected = spherical_to_cartesian(
            centre.longitude,
            centre.latitude,
            scale.heliocentric_units(centre.range),
        );
        assert!((path.samples[3] - expected).length() < 1e-9);

        // Earth moves roughly one degree per day
        let step = path.samples[0].angle_between(path.samples[1]).to_degrees();
        assert!((step - 1.0).abs() < 0.05, "step {}", step);
    }
}
