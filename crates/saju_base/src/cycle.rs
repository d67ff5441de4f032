//! Sexagenary (60-cycle) index arithmetic.
//!
//! One reference epoch anchors the day cycle: 2000-01-01 is index 54
//! (Mu-O), which matches the published `(JDN + 49) mod 60` day-pillar
//! tables. Year, month, and hour indices are pure modular formulas.

use saju_time::julian::julian_day_number;
use saju_time::{MINUTES_PER_DAY, ZI_HOUR_START_MINUTES};

use crate::branch::Branch;
use crate::stem::Stem;

/// Day-cycle reference epoch: 2000-01-01 (JDN 2451545) is index 54.
pub const REF_JDN: i64 = 2_451_545;
/// Sexagenary index of the reference day.
pub const REF_DAY_INDEX: i64 = 54;

/// An index into the 60-element sexagenary cycle, always in [0, 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleIndex(u8);

impl CycleIndex {
    /// Wrap any signed value into [0, 60).
    pub const fn new(idx: i64) -> Self {
        Self(idx.rem_euclid(60) as u8)
    }

    /// Build from separate stem and branch indices.
    ///
    /// Only half of the 120 stem/branch combinations exist in the cycle
    /// (stem and branch parities must agree); `None` otherwise. A `None`
    /// here for internally derived pairs is the `PillarLookupMiss`
    /// condition surfaced by callers.
    pub const fn from_stem_branch(stem: Stem, branch: Branch) -> Option<Self> {
        let s = stem.index() as i64;
        let b = branch.index() as i64;
        if (s % 2) != (b % 2) {
            return None;
        }
        // CRT over (mod 10, mod 12): idx = s (mod 10), idx = b (mod 12).
        let idx = (s + 10 * (((b - s).rem_euclid(12)) / 2 * 5)).rem_euclid(60);
        Some(Self(idx as u8))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn stem(self) -> Stem {
        Stem::from_index(self.0 % 10)
    }

    pub const fn branch(self) -> Branch {
        Branch::from_index(self.0 % 12)
    }

    /// Step forward (or backward) through the cycle.
    pub const fn offset(self, steps: i64) -> Self {
        Self::new(self.0 as i64 + steps)
    }

    /// Day index for a civil calendar date.
    pub fn for_day(year: i32, month: u32, day: u32) -> Self {
        let days_since_ref = julian_day_number(year, month, day) - REF_JDN;
        Self::new(REF_DAY_INDEX + days_since_ref)
    }

    /// Year index for a saju year (the year in effect after Ipchun).
    pub const fn for_year(saju_year: i32) -> Self {
        Self::new(saju_year as i64 - 4)
    }

    /// Month index from the saju year's stem and the month ordinal (1-12,
    /// 1 = tiger month). Stem start: `((year_stem mod 5) * 2 + 2) mod 10`;
    /// branch fixed by ordinal: `(ordinal + 1) mod 12`.
    pub fn for_month(year_stem: Stem, month_ordinal: u32) -> Option<Self> {
        let start = ((year_stem.index() % 5) * 2 + 2) % 10;
        let stem = Stem::from_index(start + (month_ordinal as u8 - 1));
        let branch = Branch::from_index((month_ordinal as u8 + 1) % 12);
        Self::from_stem_branch(stem, branch)
    }

    /// Hour index from the day stem and the hour branch. Stem start:
    /// `((day_stem mod 5) * 2) mod 10`.
    pub fn for_hour(day_stem: Stem, hour_branch: Branch) -> Option<Self> {
        let start = (day_stem.index() % 5) * 2;
        let stem = Stem::from_index(start + hour_branch.index());
        Self::from_stem_branch(stem, hour_branch)
    }
}

/// Hour branch from the civil minute of day. Twelve two-hour buckets
/// starting at the zi-hour boundary (23:30), so [23:30, 01:30) -> Ja.
pub const fn hour_branch_for_minutes(minutes_of_day: u32) -> Branch {
    let shifted = (minutes_of_day + MINUTES_PER_DAY - ZI_HOUR_START_MINUTES) % MINUTES_PER_DAY;
    Branch::from_index((shifted / 120) as u8)
}

impl std::fmt::Display for CycleIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.stem().name(), self.branch().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_day_is_mu_o() {
        let idx = CycleIndex::for_day(2000, 1, 1);
        assert_eq!(idx.value(), 54);
        assert_eq!(idx.stem(), Stem::Mu);
        assert_eq!(idx.branch(), Branch::O);
    }

    #[test]
    fn known_day_pillars() {
        // 1900-01-01 was a Gap-Sul day; 1990-05-15 a Gyeong-Jin day.
        let idx = CycleIndex::for_day(1900, 1, 1);
        assert_eq!((idx.stem(), idx.branch()), (Stem::Gap, Branch::Sul));
        let idx = CycleIndex::for_day(1990, 5, 15);
        assert_eq!((idx.stem(), idx.branch()), (Stem::Gyeong, Branch::Jin));
    }

    #[test]
    fn consecutive_days_step_by_one() {
        let a = CycleIndex::for_day(2024, 2, 28);
        let b = CycleIndex::for_day(2024, 2, 29);
        let c = CycleIndex::for_day(2024, 3, 1);
        assert_eq!(b.value(), (a.value() + 1) % 60);
        assert_eq!(c.value(), (b.value() + 1) % 60);
    }

    #[test]
    fn year_1984_starts_the_cycle() {
        let idx = CycleIndex::for_year(1984);
        assert_eq!(idx.value(), 0);
        assert_eq!((idx.stem(), idx.branch()), (Stem::Gap, Branch::Ja));
    }

    #[test]
    fn month_formula_gap_year_first_month() {
        // A Gap year's first month is Byeong-In.
        let idx = CycleIndex::for_month(Stem::Gap, 1).unwrap();
        assert_eq!((idx.stem(), idx.branch()), (Stem::Byeong, Branch::In));
        // A Gyeong year's fourth month is Sin-Sa (1990-05-15 chart).
        let idx = CycleIndex::for_month(Stem::Gyeong, 4).unwrap();
        assert_eq!((idx.stem(), idx.branch()), (Stem::Sin, Branch::Sa));
    }

    #[test]
    fn hour_formula_gap_day_zi_hour() {
        // Gap day, Ja hour -> Gap-Ja; Gyeong day, Sa hour -> Sin-Sa.
        let idx = CycleIndex::for_hour(Stem::Gap, Branch::Ja).unwrap();
        assert_eq!((idx.stem(), idx.branch()), (Stem::Gap, Branch::Ja));
        let idx = CycleIndex::for_hour(Stem::Gyeong, Branch::Sa).unwrap();
        assert_eq!((idx.stem(), idx.branch()), (Stem::Sin, Branch::Sa));
    }

    #[test]
    fn hour_branch_buckets() {
        assert_eq!(hour_branch_for_minutes(23 * 60 + 30), Branch::Ja);
        assert_eq!(hour_branch_for_minutes(1 * 60 + 29), Branch::Ja);
        assert_eq!(hour_branch_for_minutes(1 * 60 + 30), Branch::Chuk);
        assert_eq!(hour_branch_for_minutes(10 * 60 + 30), Branch::Sa);
        assert_eq!(hour_branch_for_minutes(12 * 60), Branch::O);
    }

    #[test]
    fn from_stem_branch_rejects_parity_mismatch() {
        assert!(CycleIndex::from_stem_branch(Stem::Gap, Branch::Chuk).is_none());
        let idx = CycleIndex::from_stem_branch(Stem::Gap, Branch::Ja).unwrap();
        assert_eq!(idx.value(), 0);
        let idx = CycleIndex::from_stem_branch(Stem::Gye, Branch::Hae).unwrap();
        assert_eq!(idx.value(), 59);
    }

    #[test]
    fn stem_branch_round_trip_all_60() {
        for i in 0..60 {
            let idx = CycleIndex::new(i);
            let back = CycleIndex::from_stem_branch(idx.stem(), idx.branch()).unwrap();
            assert_eq!(back, idx);
        }
    }
}
