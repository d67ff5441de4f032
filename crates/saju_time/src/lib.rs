//! Civil time for the saju engine: Gregorian calendar <-> Julian Date
//! conversion and the canonical `LocalDateTime` type.
//!
//! All civil timestamps in this workspace are Korea Standard Time
//! (fixed UTC+9, no DST). Astronomical computations run on UT Julian
//! Dates; the `KST_UTC_OFFSET_DAYS` constant bridges the two.

pub mod error;
pub mod julian;

pub use error::TimeError;
pub use julian::{J2000_JD, calendar_to_jd, days_in_month, is_leap_year, jd_to_calendar};

/// Fixed KST offset from UT, in fractional days (+9 hours).
pub const KST_UTC_OFFSET_DAYS: f64 = 9.0 / 24.0;

/// Minutes in a civil day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Civil minute-of-day at which the zi hour (and thus the saju day)
/// begins: 23:30.
///
/// Traditional practice places the zi-hour start at 23:00 exactly; the
/// 23:30 convention here follows the source system and has not been
/// confirmed by a domain expert. Both the day-rollover rule and the hour
/// branch bucketing read this constant so the two cannot disagree.
pub const ZI_HOUR_START_MINUTES: u32 = 23 * 60 + 30;

/// Local (KST) calendar date and time with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl LocalDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Validate calendar components, honoring leap years.
    pub fn validate(&self) -> Result<(), TimeError> {
        if self.month < 1 || self.month > 12 {
            return Err(TimeError::InvalidDate("month must be 1-12"));
        }
        if self.day < 1 || self.day > days_in_month(self.year, self.month) {
            return Err(TimeError::InvalidDate("day out of range for month"));
        }
        if self.hour > 23 {
            return Err(TimeError::InvalidDate("hour must be 0-23"));
        }
        if self.minute > 59 {
            return Err(TimeError::InvalidDate("minute must be 0-59"));
        }
        if !(0.0..60.0).contains(&self.second) {
            return Err(TimeError::InvalidDate("second must be in [0, 60)"));
        }
        Ok(())
    }

    /// Convert to a local-civil Julian Date (calendar arithmetic only).
    pub fn to_jd(&self) -> f64 {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / 86_400.0;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Convert back from a local-civil Julian Date.
    pub fn from_jd(jd: f64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(jd);
        let day = day_frac.floor() as u32;
        let total_seconds = day_frac.fract() * 86_400.0;
        let hour = (total_seconds / 3600.0).floor() as u32;
        let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Civil minute of day (0..1440), ignoring seconds.
    pub fn minutes_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// The calendar date shifted by `days` (positive or negative).
    pub fn offset_days(&self, days: i64) -> Self {
        let jd = calendar_to_jd(self.year, self.month, self.day as f64) + days as f64;
        let (year, month, day_frac) = jd_to_calendar(jd + 1e-9);
        Self {
            year,
            month,
            day: day_frac.floor() as u32,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
        }
    }
}

impl std::fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02} KST",
            self.year, self.month, self.day, self.hour, self.minute, whole
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jd_round_trip() {
        let t = LocalDateTime::new(1990, 5, 15, 10, 30, 0.0);
        let back = LocalDateTime::from_jd(t.to_jd());
        assert_eq!(back.year, 1990);
        assert_eq!(back.month, 5);
        assert_eq!(back.day, 15);
        assert_eq!(back.hour, 10);
        assert_eq!(back.minute, 30);
    }

    #[test]
    fn validate_rejects_bad_day() {
        let t = LocalDateTime::new(2023, 2, 29, 0, 0, 0.0);
        assert!(matches!(t.validate(), Err(TimeError::InvalidDate(_))));
        let t = LocalDateTime::new(2024, 2, 29, 0, 0, 0.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn offset_days_crosses_month_boundary() {
        let t = LocalDateTime::new(2024, 1, 31, 12, 0, 0.0);
        let next = t.offset_days(1);
        assert_eq!((next.year, next.month, next.day), (2024, 2, 1));
        let prev = t.offset_days(-31);
        assert_eq!((prev.year, prev.month, prev.day), (2023, 12, 31));
    }

    #[test]
    fn minutes_of_day_zi_boundary() {
        let t = LocalDateTime::new(2024, 1, 1, 23, 30, 0.0);
        assert_eq!(t.minutes_of_day(), ZI_HOUR_START_MINUTES);
    }

    #[test]
    fn display_format() {
        let t = LocalDateTime::new(1990, 5, 15, 10, 30, 0.0);
        assert_eq!(t.to_string(), "1990-05-15 10:30:00 KST");
    }
}
