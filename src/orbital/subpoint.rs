//! Geographic points directly beneath the Sun and the Moon.

use anyhow::Context;

use crate::core::coordinates::{
    EARTH_RADIUS_KM, GeographicPoint, MEAN_OBLIQUITY_RAD, ecliptic_to_equatorial,
};
use crate::core::sidereal::greenwich_mean_sidereal_angle;
use crate::orbital::ephemeris::Ephemeris;

/// Sublunar point plus the Moon's geocentric distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sublunar {
    pub point: GeographicPoint,
    /// Geocentric distance in Earth radii.
    pub range_earth_radii: f64,
}

/// Point on Earth with the Sun at its zenith.
pub fn subsolar_point(jd: f64, ephemeris: &dyn Ephemeris) -> anyhow::Result<GeographicPoint> {
    let sun = ephemeris
        .sun_apparent_equatorial(jd)
        .context("subsolar point")?;
    let gmst = greenwich_mean_sidereal_angle(jd);
    Ok(GeographicPoint::new(
        sun.declination,
        gmst - sun.right_ascension,
    ))
}

/// Point on Earth with the Moon at its zenith.
pub fn sublunar_point(jd: f64, ephemeris: &dyn Ephemeris) -> anyhow::Result<Sublunar> {
    let moon = ephemeris.moon_position(jd).context("sublunar point")?;
    let (ra, dec) = ecliptic_to_equatorial(moon.longitude, moon.latitude, MEAN_OBLIQUITY_RAD);
    let gmst = greenwich_mean_sidereal_angle(jd);
    Ok(Sublunar {
        point: GeographicPoint::new(dec, gmst - ra),
        range_earth_radii: moon.range / EARTH_RADIUS_KM,
    })
}
