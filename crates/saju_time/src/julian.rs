//! Julian Date <-> Gregorian calendar conversion.
//!
//! Standard Meeus algorithm, valid for the Gregorian calendar. The
//! fractional day carries the time of day.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// True for Gregorian leap years.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in a Gregorian calendar month.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Convert a Gregorian calendar date to a Julian Date.
///
/// `day` may carry a fractional part for the time of day.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Convert a Julian Date back to a Gregorian calendar date.
///
/// Returns `(year, month, fractional_day)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;

    let a = if z < 2_299_161.0 {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };

    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    (year as i32, month as u32, day)
}

/// Julian Day Number of a civil date (integer day count; noon-based JD
/// rounded to the day containing the civil date).
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    // calendar_to_jd at midnight ends on .5; the JDN is the next integer.
    (calendar_to_jd(year, month, day as f64) + 0.5).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_epoch() {
        let jd = calendar_to_jd(2000, 1, 1.5);
        assert!((jd - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn round_trip_dates() {
        for &(y, m, d) in &[(1990, 5, 15), (2024, 2, 29), (1900, 1, 1), (2044, 12, 31)] {
            let jd = calendar_to_jd(y, m, d as f64);
            let (ry, rm, rd) = jd_to_calendar(jd);
            assert_eq!((ry, rm, rd.round() as u32), (y, m, d));
        }
    }

    #[test]
    fn jdn_known_values() {
        // Published JDN anchors.
        assert_eq!(julian_day_number(2000, 1, 1), 2_451_545);
        assert_eq!(julian_day_number(1900, 1, 1), 2_415_021);
    }

    #[test]
    fn leap_year_rules() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
    }
}
