//! Ephemeris adapter
//!
//! The geometry engine only consumes ephemeris outputs. Anything implementing [`Ephemeris`]
//! can back it; [`LowPrecisionEphemeris`] is the built-in analytic implementation.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, ensure};
use bevy::prelude::*;

use crate::orbital::moon::moon_geocentric_ecliptic;
use crate::orbital::sun::{earth_heliocentric_j2000, sun_apparent_ra_dec};

/// Bodies the adapter can place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Body {
    /// Heliocentric, J2000 ecliptic, range in AU.
    Earth,
    /// Geocentric, ecliptic of date, range in km.
    Moon,
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Earth => write!(f, "Earth"),
            Body::Moon => write!(f, "Moon"),
        }
    }
}

/// Spherical position snapshot (radians, range in the body's native unit).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EphemerisPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub range: f64,
}

impl EphemerisPoint {
    /// Reject non-finite or negative outputs from an adapter.
    pub fn validated(self, what: &str) -> anyhow::Result<Self> {
        ensure!(
            self.longitude.is_finite() && self.latitude.is_finite() && self.range.is_finite(),
            "{what}: non-finite ephemeris output {self:?}"
        );
        ensure!(self.range >= 0.0, "{what}: negative range {}", self.range);
        Ok(self)
    }
}

/// Apparent equatorial direction in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquatorialPoint {
    pub right_ascension: f64,
    pub declination: f64,
}

impl EquatorialPoint {
    pub fn validated(self, what: &str) -> anyhow::Result<Self> {
        ensure!(
            self.right_ascension.is_finite() && self.declination.is_finite(),
            "{what}: non-finite ephemeris output {self:?}"
        );
        Ok(self)
    }
}

/// Deterministic, side-effect-free ephemeris evaluator.
pub trait Ephemeris: Send + Sync {
    /// Ecliptic position of `body` at Julian Date `jd`.
    fn position(&self, body: Body, jd: f64) -> anyhow::Result<EphemerisPoint>;

    /// Apparent equatorial position of the Sun.
    fn sun_apparent_equatorial(&self, jd: f64) -> anyhow::Result<EquatorialPoint>;

    /// Geocentric ecliptic position of the Moon, range in km.
    fn moon_position(&self, jd: f64) -> anyhow::Result<EphemerisPoint> {
        self.position(Body::Moon, jd)
    }
}

/// Analytic Meeus-based ephemeris.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowPrecisionEphemeris;

impl Ephemeris for LowPrecisionEphemeris {
    fn position(&self, body: Body, jd: f64) -> anyhow::Result<EphemerisPoint> {
        ensure!(jd.is_finite(), "cannot evaluate {body} at non-finite JD {jd}");
        let point = match body {
            Body::Earth => {
                let (longitude, latitude, range) = earth_heliocentric_j2000(jd);
                EphemerisPoint {
                    longitude,
                    latitude,
                    range,
                }
            }
            Body::Moon => moon_geocentric_ecliptic(jd),
        };
        point.validated(&format!("{body} at JD {jd}"))
    }

    fn sun_apparent_equatorial(&self, jd: f64) -> anyhow::Result<EquatorialPoint> {
        ensure!(jd.is_finite(), "cannot evaluate Sun at non-finite JD {jd}");
        let (right_ascension, declination) = sun_apparent_ra_dec(jd);
        EquatorialPoint {
            right_ascension,
            declination,
        }
        .validated("Sun")
        .with_context(|| format!("apparent Sun at JD {jd}"))
    }
}

/// Shared handle to the active ephemeris.
#[derive(Resource, Clone, Deref)]
pub struct EphemerisSource(pub Arc<dyn Ephemeris>);

impl EphemerisSource {
    pub fn new(ephemeris: impl Ephemeris + 'static) -> Self {
        Self(Arc::new(ephemeris))
    }

    pub fn as_dyn(&self) -> &dyn Ephemeris {
        self.0.as_ref()
    }
}

impl Default for EphemerisSource {
    fn default() -> Self {
        Self::new(LowPrecisionEphemeris)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sidereal::J2000_JD;

    #[test]
    fn test_low_precision_is_deterministic() {
        let eph = LowPrecisionEphemeris;
        let a = eph.position(Body::Earth, J2000_JD + 12.25).unwrap();
        let b = eph.position(Body::Earth, J2000_JD + 12.25).unwrap();
        assert_eq!(a, b);
        let m1 = eph.moon_position(J2000_JD).unwrap();
        let m2 = eph.position(Body::Moon, J2000_JD).unwrap();
        assert_eq!(m1, m2);
    }

    #[test]
    fn test_earth_range_in_au_and_moon_range_in_km() {
        let eph = LowPrecisionEphemeris;
        let earth = eph.position(Body::Earth, J2000_JD).unwrap();
        assert!((0.98..1.02).contains(&earth.range));
        let moon = eph.moon_position(J2000_JD).unwrap();
        assert!((350_000.0..410_000.0).contains(&moon.range));
    }

    #[test]
    fn test_non_finite_jd_is_an_error() {
        let eph = LowPrecisionEphemeris;
        assert!(eph.position(Body::Earth, f64::NAN).is_err());
        assert!(eph.sun_apparent_equatorial(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validation_rejects_garbage() {
        let bad = EphemerisPoint {
            longitude: 0.0,
            latitude: f64::NAN,
            range: 1.0,
        };
        let err = bad.validated("fixture").unwrap_err();
        assert!(err.to_string().contains("fixture"));

        let negative = EphemerisPoint {
            longitude: 0.0,
            latitude: 0.0,
            range: -1.0,
        };
        assert!(negative.validated("fixture").is_err());
    }

    #[test]
    fn test_source_defaults_to_low_precision() {
        let source = EphemerisSource::default();
        let direct = LowPrecisionEphemeris.sun_apparent_equatorial(J2000_JD).unwrap();
        let via_source = source.sun_apparent_equatorial(J2000_JD).unwrap();
        assert_eq!(direct, via_source);
    }
}
