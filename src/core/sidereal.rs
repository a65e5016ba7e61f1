//! Julian Date conversions and Greenwich Mean Sidereal Time

use chrono::{DateTime, Utc};
use std::f64::consts::TAU;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT, treated as UTC here).
pub const J2000_JD: f64 = 2451545.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2440587.5;

pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Julian Date (UTC) of a timestamp, counted from the Unix epoch.
///
/// chrono's calendar is proleptic Gregorian, so dates before 1582 follow it too.
pub fn julian_date_utc(t: DateTime<Utc>) -> f64 {
    let secs = t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + secs / SECONDS_PER_DAY
}

/// UTC timestamp for a Julian Date, or `None` if it falls outside chrono's range.
pub fn utc_from_julian_date(jd: f64) -> Option<DateTime<Utc>> {
    if !jd.is_finite() {
        return None;
    }
    let unix_secs = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
    let whole = unix_secs.floor();
    let nanos = ((unix_secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Greenwich Mean Sidereal angle in radians, [0, 2pi), IAU 1982 polynomial.
///
/// UT1 is taken equal to UTC.
pub fn greenwich_mean_sidereal_angle(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / 36525.0;

    let gmst_sec = 67310.54841 + (876600.0 * 3600.0 + 8640184.812866) * t + 0.093104 * t * t
        - 6.2e-6 * t * t * t;

    let deg = (gmst_sec / 240.0).rem_euclid(360.0);
    let rad = deg.to_radians();
    if rad >= TAU { 0.0 } else { rad }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_julian_date_j2000_noon() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = julian_date_utc(t);
        assert!((jd - J2000_JD).abs() < 1e-9, "jd = {}", jd);
    }

    #[test]
    fn test_julian_date_eclipse_instant() {
        let t = Utc.with_ymd_and_hms(2024, 4, 8, 19, 0, 0).unwrap();
        let jd = julian_date_utc(t);
        assert!((jd - 2460409.2916666665).abs() < 1e-8, "jd = {}", jd);
    }

    #[test]
    fn test_julian_date_leap_year_boundaries() {
        let feb_28 = Utc.with_ymd_and_hms(2000, 2, 28, 12, 0, 0).unwrap();
        let feb_29 = Utc.with_ymd_and_hms(2000, 2, 29, 12, 0, 0).unwrap();
        let mar_01 = Utc.with_ymd_and_hms(2000, 3, 1, 12, 0, 0).unwrap();

        assert!((julian_date_utc(feb_29) - julian_date_utc(feb_28) - 1.0).abs() < 1e-9);
        assert!((julian_date_utc(mar_01) - julian_date_utc(feb_29) - 1.0).abs() < 1e-9);

        let y1900_feb_28 = Utc.with_ymd_and_hms(1900, 2, 28, 0, 0, 0).unwrap();
        let y1900_mar_01 = Utc.with_ymd_and_hms(1900, 3, 1, 0, 0, 0).unwrap();
        assert!((julian_date_utc(y1900_mar_01) - julian_date_utc(y1900_feb_28) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_utc_from_julian_date_roundtrip() {
        let t = Utc.with_ymd_and_hms(2024, 4, 8, 19, 0, 0).unwrap();
        let back = utc_from_julian_date(julian_date_utc(t)).unwrap();
        let drift_ms = (back - t).num_milliseconds().abs();
        assert!(drift_ms <= 1, "drift {} ms", drift_ms);

        let unix = utc_from_julian_date(UNIX_EPOCH_JD).unwrap();
        assert_eq!(unix.timestamp(), 0);
    }

    #[test]
    fn test_julian_date_sub_second_and_pre_epoch() {
        let t = Utc.with_ymd_and_hms(1969, 12, 31, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(500);
        let expected = UNIX_EPOCH_JD - 0.5 + 0.5 / SECONDS_PER_DAY;
        assert!((julian_date_utc(t) - expected).abs() < 1e-9);

        // Gregorian reform boundary: 1582-10-15 is JD 2299160.5
        let reform = Utc.with_ymd_and_hms(1582, 10, 15, 0, 0, 0).unwrap();
        assert!((julian_date_utc(reform) - 2299160.5).abs() < 1e-6);
    }

    #[test]
    fn test_utc_from_julian_date_rejects_non_finite() {
        assert!(utc_from_julian_date(f64::NAN).is_none());
        assert!(utc_from_julian_date(f64::INFINITY).is_none());
    }

    #[test]
    fn test_gmst_j2000_known_value() {
        // GMST at J2000.0 is 18.697374558 h = 280.46061837 deg
        let deg = greenwich_mean_sidereal_angle(J2000_JD).to_degrees();
        assert!((deg - 280.46061837).abs() < 1e-6, "gmst {} deg", deg);
    }

    #[test]
    fn test_gmst_in_range_across_epochs() {
        let mut jd = 2_200_000.0;
        while jd < 2_700_000.0 {
            let gmst = greenwich_mean_sidereal_angle(jd);
            assert!((0.0..TAU).contains(&gmst), "gmst {} at jd {}", gmst, jd);
            jd += 1234.567;
        }
    }

    #[test]
    fn test_gmst_negative_centuries_normalized() {
        // Before J2000 the polynomial goes negative
        for jd in [2_415_020.0, 2_400_000.5, 2_300_000.25] {
            let gmst = greenwich_mean_sidereal_angle(jd);
            assert!((0.0..TAU).contains(&gmst));
        }
    }

    #[test]
    fn test_gmst_advances_one_sidereal_day_per_solar_day() {
        let a = greenwich_mean_sidereal_angle(J2000_JD);
        let b = greenwich_mean_sidereal_angle(J2000_JD + 1.0);
        let advance = (b - a).rem_euclid(TAU).to_degrees();
        assert!((advance - 0.9856).abs() < 1e-3, "advance {} deg", advance);
    }
}
