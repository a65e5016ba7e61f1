//! Low-precision solar theory (Meeus, Astronomical Algorithms, ch. 25).
//!
//! Accurate to about 0.01 degrees, well below what the subsolar marker can show.

use crate::core::coordinates::{ecliptic_to_equatorial, normalize_angle};
use crate::core::sidereal::J2000_JD;

/// Intermediate solar quantities for one instant.
#[derive(Clone, Copy, Debug)]
pub struct SolarState {
    /// Geometric (true) geocentric longitude of the Sun, mean equinox of date, degrees.
    pub true_longitude_deg: f64,
    /// Apparent longitude (nutation + aberration applied), degrees.
    pub apparent_longitude_deg: f64,
    /// Sun-Earth distance in AU.
    pub distance_au: f64,
    /// True obliquity of the ecliptic, degrees.
    pub obliquity_deg: f64,
    /// Julian centuries since J2000.0.
    pub centuries: f64,
}

pub fn solar_state(jd: f64) -> SolarState {
    let t = (jd - J2000_JD) / 36525.0;

    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = 357.52911 + 35999.05029 * t - 0.0001537 * t * t;
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;
    let m_rad = m.to_radians();

    // Equation of center
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin()
        + 0.000289 * (3.0 * m_rad).sin();

    let true_longitude = l0 + c;
    let true_anomaly = (m + c).to_radians();
    let distance_au = 1.000001018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    let omega = (125.04 - 1934.136 * t).to_radians();
    let apparent_longitude = true_longitude - 0.00569 - 0.00478 * omega.sin();

    let mean_obliquity = 23.439291111 - 0.013004167 * t - 0.0000001639 * t * t
        + 0.0000005036 * t * t * t;
    let obliquity = mean_obliquity + 0.00256 * omega.cos();

    SolarState {
        true_longitude_deg: true_longitude.rem_euclid(360.0),
        apparent_longitude_deg: apparent_longitude.rem_euclid(360.0),
        distance_au,
        obliquity_deg: obliquity,
        centuries: t,
    }
}

/// Apparent right ascension and declination of the Sun in radians (ra in [0, 2pi)).
pub fn sun_apparent_ra_dec(jd: f64) -> (f64, f64) {
    let state = solar_state(jd);
    ecliptic_to_equatorial(
        state.apparent_longitude_deg.to_radians(),
        0.0,
        state.obliquity_deg.to_radians(),
    )
}

/// Heliocentric ecliptic position of the Earth referred to the J2000 equinox.
///
/// Returns `(longitude rad in [0, 2pi), latitude rad, distance AU)`.
pub fn earth_heliocentric_j2000(jd: f64) -> (f64, f64, f64) {
    let state = solar_state(jd);
    // Earth sits opposite the geocentric Sun; reduce of-date longitude to J2000
    let lon_deg = state.true_longitude_deg + 180.0 - 1.397 * state.centuries;
    (normalize_angle(lon_deg.to_radians()), 0.0, state.distance_au)
}
