//! Core coordinate utilities
//!
//! Pure conversions shared by every consumer of the celestial geometry:
//! - spherical (longitude, latitude, range) triples to Cartesian world vectors
//! - geographic points to body-local vectors on/around a sphere
//! - ecliptic to equatorial angles
//!
//! The geographic convention (polar angle `pi/2 - lat`, azimuth `pi - lon`) is shared by the
//! orientation solver, the surface markers and the surface observer. They must all go through
//! [`geographic_to_cartesian`] or the markers drift away from the lit hemisphere.

use bevy::math::DVec3;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Mean Earth radius used to express lunar distance in body radii.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Astronomical unit in kilometers.
pub const AU_KM: f64 = 149_597_870.7;

/// Fixed mean obliquity of the ecliptic (J2000) used for ecliptic -> equatorial conversion.
pub const MEAN_OBLIQUITY_RAD: f64 = 23.43928 * PI / 180.0;

/// Closest latitude to a pole the surface basis accepts.
pub const POLE_GUARD_RAD: f64 = 1e-6;

/// Geographic point in radians.
///
/// Latitude is kept in [-pi/2, pi/2] and longitude in (-pi, pi]. Longitude is measured
/// west-positive (Greenwich hour-angle convention), which is what `GMST - RA` produces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeographicPoint {
    latitude: f64,
    longitude: f64,
}

impl GeographicPoint {
    /// Build a point, normalizing both angles.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-FRAC_PI_2, FRAC_PI_2),
            longitude: normalize_longitude(longitude),
        }
    }

    pub fn from_degrees(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self::new(latitude_deg.to_radians(), longitude_deg.to_radians())
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn as_degrees(&self) -> (f64, f64) {
        (self.latitude.to_degrees(), self.longitude.to_degrees())
    }

    /// Same point with latitude pulled strictly inside (-pi/2, pi/2).
    ///
    /// The East/North basis is undefined at the poles.
    pub fn off_pole(&self) -> Self {
        let limit = FRAC_PI_2 - POLE_GUARD_RAD;
        Self {
            latitude: self.latitude.clamp(-limit, limit),
            longitude: self.longitude,
        }
    }

    /// Body-local vector for this point at `radius`.
    pub fn to_local(&self, radius: f64) -> DVec3 {
        geographic_to_cartesian(self.latitude, self.longitude, radius)
    }
}

/// Wrap an angle into (-pi, pi].
pub fn normalize_longitude(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Wrap an angle into [0, 2pi).
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert a (longitude, latitude, range) triple to a Cartesian vector (+Z toward latitude +pi/2).
pub fn spherical_to_cartesian(lon: f64, lat: f64, range: f64) -> DVec3 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    DVec3::new(
        range * cos_lat * cos_lon,
        range * cos_lat * sin_lon,
        range * sin_lat,
    )
}

/// Inverse of [`spherical_to_cartesian`], returning `(lon, lat, range)` with lon in [0, 2pi).
///
/// The zero vector maps to `(0, 0, 0)`.
pub fn cartesian_to_spherical(v: DVec3) -> (f64, f64, f64) {
    let range = v.length();
    if range == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let lat = (v.z / range).clamp(-1.0, 1.0).asin();
    let lon = normalize_angle(v.y.atan2(v.x));
    (lon, lat, range)
}

/// Convert a surface-fixed geographic point to a body-local vector (+Y = north pole).
pub fn geographic_to_cartesian(lat: f64, lon: f64, radius: f64) -> DVec3 {
    let phi = FRAC_PI_2 - lat;
    let theta = PI - lon;
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    DVec3::new(
        -radius * sin_phi * cos_theta,
        radius * cos_phi,
        radius * sin_phi * sin_theta,
    )
}

/// Local North and East unit vectors at a geographic point, in the body-local frame.
///
/// East is true (planetographic) east, i.e. toward decreasing west-positive longitude,
/// so that `east x north = up`.
pub fn local_north_east(point: GeographicPoint) -> (DVec3, DVec3) {
    let phi = FRAC_PI_2 - point.latitude();
    let theta = PI - point.longitude();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let north = DVec3::new(cos_phi * cos_theta, sin_phi, -cos_phi * sin_theta);
    let east = DVec3::new(sin_theta, 0.0, cos_theta);
    (north, east)
}

/// Ecliptic (lambda, beta) to equatorial (ra, dec) for a fixed obliquity.
///
/// `ra` is returned in [0, 2pi).
pub fn ecliptic_to_equatorial(lambda: f64, beta: f64, obliquity: f64) -> (f64, f64) {
    let (sin_eps, cos_eps) = obliquity.sin_cos();
    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    let (sin_beta, cos_beta) = beta.sin_cos();

    let sin_dec = sin_beta * cos_eps + cos_beta * sin_eps * sin_lambda;
    let dec = sin_dec.clamp(-1.0, 1.0).asin();
    let ra = (sin_lambda * cos_eps - beta.tan() * sin_eps).atan2(cos_lambda);
    (normalize_angle(ra), dec)
}

// =================================== Tests ===================================
