//! Low-precision lunar theory.
//!
//! Dominant periodic terms of Meeus, Astronomical Algorithms, ch. 47 (tables 47.A/47.B).
//! Good to a few arcminutes, which is plenty for placing the Moon and its sublunar point.

use crate::core::sidereal::J2000_JD;
use crate::orbital::ephemeris::EphemerisPoint;

/// Longitude/distance term: multipliers of (D, M, M', F), then l in 1e-6 deg and r in 1e-3 km.
type LonDistTerm = (i8, i8, i8, i8, i32, i32);

/// Latitude term: multipliers of (D, M, M', F), then b in 1e-6 deg.
type LatTerm = (i8, i8, i8, i8, i32);

#[rustfmt::skip]
const LON_DIST_TERMS: [LonDistTerm; 20] = [
    (0,  0,  1,  0, 6288774, -20905355),
    (2,  0, -1,  0, 1274027,  -3699111),
    (2,  0,  0,  0,  658314,  -2955968),
    (0,  0,  2,  0,  213618,   -569925),
    (0,  1,  0,  0, -185116,     48888),
    (0,  0,  0,  2, -114332,     -3149),
    (2,  0, -2,  0,   58793,    246158),
    (2, -1, -1,  0,   57066,   -152138),
    (2,  0,  1,  0,   53322,   -170733),
    (2, -1,  0,  0,   45758,   -204586),
    (0,  1, -1,  0,  -40923,   -129620),
    (1,  0,  0,  0,  -34720,    108743),
    (0,  1,  1,  0,  -30383,    104755),
    (2,  0,  0, -2,   15327,     10321),
    (0,  0,  1,  2,  -12528,         0),
    (0,  0,  1, -2,   10980,     79661),
    (4,  0, -1,  0,   10675,    -34782),
    (0,  0,  3,  0,   10034,    -23210),
    (4,  0, -2,  0,    8548,    -21636),
    (2,  1, -1,  0,   -7888,     24208),
];

#[rustfmt::skip]
const LAT_TERMS: [LatTerm; 20] = [
    (0,  0,  0,  1, 5128122),
    (0,  0,  1,  1,  280602),
    (0,  0,  1, -1,  277693),
    (2,  0,  0, -1,  173237),
    (2,  0, -1,  1,   55413),
    (2,  0, -1, -1,   46271),
    (2,  0,  0,  1,   32573),
    (0,  0,  2,  1,   17198),
    (2,  0,  1, -1,    9266),
    (0,  0,  2, -1,    8822),
    (2, -1,  0, -1,    8216),
    (2,  0, -2, -1,    4324),
    (2,  0,  1,  1,    4200),
    (2,  1,  0, -1,   -3359),
    (2, -1, -1,  1,    2463),
    (2, -1,  0,  1,    2211),
    (2, -1, -1, -1,    2065),
    (0,  1, -1, -1,   -1870),
    (4,  0, -1, -1,    1828),
    (0,  1,  0,  1,   -1794),
];

/// Mean lunar distance in km.
const MEAN_DISTANCE_KM: f64 = 385000.56;

/// Fundamental arguments in degrees: (L', D, M, M', F).
fn fundamental_arguments(t: f64) -> (f64, f64, f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let l_prime = 218.3164477 + 481267.88123421 * t - 0.0015786 * t2 + t3 / 538841.0
        - t4 / 65194000.0;
    let d = 297.8501921 + 445267.1114034 * t - 0.0018819 * t2 + t3 / 545868.0
        - t4 / 113065000.0;
    let m = 357.5291092 + 35999.0502909 * t - 0.0001536 * t2 + t3 / 24490000.0;
    let mp = 134.9633964 + 477198.8675055 * t + 0.0087414 * t2 + t3 / 69699.0
        - t4 / 14712000.0;
    let f = 93.2720950 + 483202.0175233 * t - 0.0036539 * t2 - t3 / 3526000.0
        + t4 / 863310000.0;
    (
        l_prime.rem_euclid(360.0),
        d.rem_euclid(360.0),
        m.rem_euclid(360.0),
        mp.rem_euclid(360.0),
        f.rem_euclid(360.0),
    )
}

/// Geocentric ecliptic position of the Moon (of date): longitude/latitude in radians, range in km.
pub fn moon_geocentric_ecliptic(jd: f64) -> EphemerisPoint {
    let t = (jd - J2000_JD) / 36525.0;
    let (l_prime, d, m, mp, f) = fundamental_arguments(t);

    // Eccentricity damping for terms involving the Sun's mean anomaly
    let e = 1.0 - 0.002516 * t - 0.0000074 * t * t;
    let e_factor = |m_mult: i8| match m_mult.abs() {
        1 => e,
        2 => e * e,
        _ => 1.0,
    };
    let argument = |dm: i8, mm: i8, mpm: i8, fm: i8| {
        (dm as f64 * d + mm as f64 * m + mpm as f64 * mp + fm as f64 * f).to_radians()
    };

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for (dm, mm, mpm, fm, l, r) in LON_DIST_TERMS {
        let arg = argument(dm, mm, mpm, fm);
        sum_l += l as f64 * e_factor(mm) * arg.sin();
        sum_r += r as f64 * e_factor(mm) * arg.cos();
    }

    let mut sum_b = 0.0;
    for (dm, mm, mpm, fm, b) in LAT_TERMS {
        sum_b += b as f64 * e_factor(mm) * argument(dm, mm, mpm, fm).sin();
    }

    let l_prime_rad = l_prime.to_radians();
    let f_rad = f.to_radians();
    let mp_rad = mp.to_radians();

    // Venus, Jupiter and flattening corrections
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479264.290 * t).to_radians();
    let a3 = (313.45 + 481266.484 * t).to_radians();

    sum_l += 3958.0 * a1.sin() + 1962.0 * (l_prime_rad - f_rad).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * l_prime_rad.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f_rad).sin()
        + 175.0 * (a1 + f_rad).sin()
        + 127.0 * (l_prime_rad - mp_rad).sin()
        - 115.0 * (l_prime_rad + mp_rad).sin();

    EphemerisPoint {
        longitude: (l_prime + sum_l / 1_000_000.0).rem_euclid(360.0).to_radians(),
        latitude: (sum_b / 1_000_000.0).to_radians(),
        range: MEAN_DISTANCE_KM + sum_r / 1000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moon_distance_bounds() {
        // 2024-01-01, 2024-06-01, 2025-01-01 (00:00 UTC)
        for jd in [2460310.5, 2460462.5, 2460676.5] {
            let p = moon_geocentric_ecliptic(jd);
            assert!(
                (350_000.0..=410_000.0).contains(&p.range),
                "distance out of bounds: {}",
                p.range
            );
        }
    }

    #[test]
    fn test_moon_latitude_within_orbital_inclination() {
        let mut jd = 2460000.0;
        while jd < 2460060.0 {
            let p = moon_geocentric_ecliptic(jd);
            assert!(p.latitude.abs().to_degrees() < 5.4, "beta {}", p.latitude);
            jd += 0.37;
        }
    }

    #[test]
    fn test_meeus_example_47a() {
        // 1992-04-12 0h TD: lambda = 133.162655 deg, beta = -3.229126 deg, delta = 368409.7 km
        let p = moon_geocentric_ecliptic(2448724.5);
        assert!((p.longitude.to_degrees() - 133.162655).abs() < 0.05);
        assert!((p.latitude.to_degrees() + 3.229126).abs() < 0.05);
        assert!((p.range - 368409.7).abs() < 100.0);
    }

    #[test]
    fn test_moon_near_sun_during_total_eclipse() {
        // 2024-04-08 18:18 UTC: Moon and Sun within a fraction of a degree
        let p = moon_geocentric_ecliptic(2460409.2625);
        let lon = p.longitude.to_degrees();
        assert!((lon - 19.2).abs() < 0.6, "lambda {}", lon);
    }
}
