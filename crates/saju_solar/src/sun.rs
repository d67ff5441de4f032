//! Apparent solar ecliptic longitude from a truncated analytic series.
//!
//! Mean longitude and mean anomaly polynomials plus the equation-of-center
//! correction and the dominant nutation/aberration term. Accuracy is a few
//! arcseconds over 1900-2100, far below the sub-minute precision the term
//! search refines to.

use saju_time::J2000_JD;

/// Julian centuries since J2000.0 for a UT Julian Date.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / 36_525.0
}

/// Normalize an angle in degrees into [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Apparent ecliptic longitude of the Sun in degrees, [0, 360).
pub fn sun_apparent_longitude(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);

    // Geometric mean longitude and mean anomaly.
    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = 357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t;
    let m_rad = m.to_radians();

    // Equation of center.
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m_rad.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m_rad).sin()
        + 0.000_289 * (3.0 * m_rad).sin();

    let true_lon = l0 + c;

    // Nutation and aberration correction to apparent longitude.
    let omega = 125.04 - 1934.136 * t;
    let apparent = true_lon - 0.005_69 - 0.004_78 * omega.to_radians().sin();

    normalize_360(apparent)
}

/// Signed offset of the Sun's longitude from a target longitude,
/// wrapped into [0, 360).
pub fn longitude_offset(jd: f64, target_deg: f64) -> f64 {
    normalize_360(sun_apparent_longitude(jd) - target_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saju_time::calendar_to_jd;

    #[test]
    fn normalize_wraps_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_360(370.0) - 10.0).abs() < 1e-12);
        assert_eq!(normalize_360(0.0), 0.0);
    }

    #[test]
    fn longitude_near_equinox() {
        // 2024 March equinox: 2024-03-20 03:06 UT. Longitude ~0 deg.
        let jd = calendar_to_jd(2024, 3, 20.129);
        let lon = sun_apparent_longitude(jd);
        let dist = lon.min(360.0 - lon);
        assert!(dist < 0.05, "longitude at equinox was {lon}");
    }

    #[test]
    fn longitude_near_winter_solstice() {
        // 2023-12-22 03:27 UT, longitude ~270 deg.
        let jd = calendar_to_jd(2023, 12, 22.144);
        let lon = sun_apparent_longitude(jd);
        assert!((lon - 270.0).abs() < 0.05, "longitude at solstice was {lon}");
    }

    #[test]
    fn longitude_increases_about_one_degree_per_day() {
        let jd = calendar_to_jd(2024, 4, 10.0);
        let a = sun_apparent_longitude(jd);
        let b = sun_apparent_longitude(jd + 1.0);
        let delta = normalize_360(b - a);
        assert!((0.9..1.1).contains(&delta), "daily motion was {delta}");
    }
}
