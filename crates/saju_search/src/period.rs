//! Fortune timelines: decade (daeun), year (saeun), and month (wolun).
//!
//! Every timeline entry is a sexagenary pillar annotated against the
//! natal day master, so the ten-god and twelve-stage reading of a period
//! is always relative to the person the timeline belongs to.

use saju_base::{Branch, CycleIndex, Stem, TenGod, TwelveStage, ten_god, twelve_stage};
use saju_chart::Chart;
use saju_solar::{SolarTerm, TermEngine};
use saju_time::LocalDateTime;

use crate::error::SearchError;

/// Biological sex for the daeun direction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// One timeline entry. `label` is the starting age for daeun entries,
/// the Korean age for saeun entries, and the month ordinal for wolun.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    pub cycle: CycleIndex,
    pub label: i32,
    pub calendar_year: i32,
    pub stem_ten_god: TenGod,
    pub branch_ten_god: TenGod,
    pub stage: TwelveStage,
}

fn annotate(cycle: CycleIndex, day_stem: Stem, label: i32, calendar_year: i32) -> Period {
    Period {
        cycle,
        label,
        calendar_year,
        stem_ten_god: ten_god(day_stem, cycle.stem()),
        branch_ten_god: ten_god(day_stem, cycle.branch().main_hidden_stem()),
        stage: twelve_stage(day_stem, cycle.branch()),
    }
}

/// A decade-fortune timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DaeunTimeline {
    /// True when the month pillar steps forward through the cycle.
    pub forward: bool,
    /// Age at which the first decade takes effect.
    pub start_age: u32,
    /// Month remainder of the start age.
    pub start_months: u32,
    pub periods: Vec<Period>,
}

/// Number of decades produced per timeline.
const DAEUN_PERIODS: usize = 12;

/// Each 3 days to the bounding solar term maps to one year of start age.
const DAYS_PER_START_YEAR: f64 = 3.0;

/// Build the decade-fortune timeline for a chart.
///
/// Direction: yang year stem with a male subject, or yin year stem with
/// a female subject, runs forward; the other two pairings run backward.
/// The start age is the distance from birth to the bounding solar term
/// (the next one when forward, the previous one when backward) at three
/// days per year.
pub fn daeun(chart: &Chart, gender: Gender) -> DaeunTimeline {
    let year_stem = chart.year.stem();
    let forward = year_stem.is_yang() == (gender == Gender::Male);

    let birth_jd = chart.birth.to_jd();
    let days = if forward {
        chart.terms.next.jd_local - birth_jd
    } else {
        birth_jd - chart.terms.current.jd_local
    };
    let days = days.max(0.0);

    let mut start_age = (days / DAYS_PER_START_YEAR).floor() as u32;
    let mut start_months =
        ((days - f64::from(start_age) * DAYS_PER_START_YEAR) / DAYS_PER_START_YEAR * 12.0)
            .round() as u32;
    if start_months >= 12 {
        start_age += 1;
        start_months = 0;
    }

    let day_stem = chart.day_stem();
    let periods = (0..DAEUN_PERIODS)
        .map(|i| {
            let steps = (i as i64) + 1;
            let cycle = chart
                .month
                .cycle
                .offset(if forward { steps } else { -steps });
            let age = start_age + 10 * i as u32;
            annotate(cycle, day_stem, age as i32, chart.birth.year + age as i32)
        })
        .collect();

    DaeunTimeline {
        forward,
        start_age,
        start_months,
        periods,
    }
}

/// Year-fortune entries for an inclusive calendar-year range. The label
/// is the Korean age (calendar year - birth year + 1).
pub fn saeun(chart: &Chart, start_year: i32, end_year: i32) -> Result<Vec<Period>, SearchError> {
    if end_year < start_year {
        return Err(SearchError::InvalidRange("end year before start year"));
    }
    let day_stem = chart.day_stem();
    Ok((start_year..=end_year)
        .map(|year| {
            let korean_age = year - chart.birth.year + 1;
            annotate(CycleIndex::for_year(year), day_stem, korean_age, year)
        })
        .collect())
}

/// One month-fortune entry, anchored to its opening solar term.
#[derive(Debug, Clone, PartialEq)]
pub struct WolunEntry {
    pub period: Period,
    pub term: SolarTerm,
    pub term_instant: LocalDateTime,
    /// True when `now` falls inside this month's term interval.
    pub is_current: bool,
}

/// Month-fortune entries for the 12 term-anchored months of a saju year.
/// `now` decides which entry (at most one) is marked current.
pub fn wolun(
    engine: &TermEngine,
    chart: &Chart,
    target_year: i32,
    now: &LocalDateTime,
) -> Result<Vec<WolunEntry>, SearchError> {
    let boundaries = engine.boundaries_for_year(target_year)?;
    let year_stem = CycleIndex::for_year(target_year).stem();
    let day_stem = chart.day_stem();
    let now_jd = now.to_jd();

    let mut entries = Vec::with_capacity(12);
    for window in boundaries.windows(2) {
        let (open, close) = (&window[0], &window[1]);
        let ordinal = open.term.month_ordinal();
        let cycle = CycleIndex::for_month(year_stem, ordinal).ok_or(
            SearchError::PillarLookupMiss {
                stem: year_stem,
                branch: Branch::from_index((ordinal as u8 + 1) % 12),
            },
        )?;
        entries.push(WolunEntry {
            period: annotate(cycle, day_stem, ordinal as i32, open.instant.year),
            term: open.term,
            term_instant: open.instant,
            is_current: now_jd >= open.jd_local && now_jd < close.jd_local,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saju_base::{Branch, Stem};
    use saju_chart::{BirthInput, build_chart};

    fn chart_1990() -> Chart {
        build_chart(
            &TermEngine::new(),
            &BirthInput {
                year: 1990,
                month: 5,
                day: 15,
                time: Some((10, 30)),
            },
        )
        .unwrap()
    }

    #[test]
    fn daeun_direction_splits_by_gender() {
        // 1990 year stem Gyeong is yang: male runs forward.
        let chart = chart_1990();
        assert!(daeun(&chart, Gender::Male).forward);
        assert!(!daeun(&chart, Gender::Female).forward);
    }

    #[test]
    fn daeun_forward_steps_month_pillar() {
        let chart = chart_1990();
        let timeline = daeun(&chart, Gender::Male);
        assert_eq!(timeline.periods.len(), 12);
        for (i, period) in timeline.periods.iter().enumerate() {
            assert_eq!(period.cycle, chart.month.cycle.offset(i as i64 + 1));
        }
        // Ages step by exactly one decade.
        for pair in timeline.periods.windows(2) {
            assert_eq!(pair[1].label - pair[0].label, 10);
        }
    }

    #[test]
    fn daeun_backward_first_period_precedes_month_pillar() {
        let chart = chart_1990();
        let timeline = daeun(&chart, Gender::Female);
        // Month pillar Sin-Sa steps back to Gyeong-Jin.
        let first = timeline.periods[0].cycle;
        assert_eq!(first.stem(), Stem::Gyeong);
        assert_eq!(first.branch(), Branch::Jin);
    }

    #[test]
    fn daeun_start_age_from_term_distance() {
        // Birth 1990-05-15, forward bound Mangjong (about June 6): roughly
        // 22 days away, so the start age lands at 7.
        let chart = chart_1990();
        let timeline = daeun(&chart, Gender::Male);
        assert!(
            (6..=8).contains(&timeline.start_age),
            "start age was {}",
            timeline.start_age
        );
        assert!(timeline.start_months < 12);
    }

    #[test]
    fn saeun_known_year_pillar_and_age() {
        let chart = chart_1990();
        let periods = saeun(&chart, 2024, 2026).unwrap();
        assert_eq!(periods.len(), 3);
        // 2024 is Gap-Jin; Korean age for a 1990 birth is 35.
        assert_eq!(periods[0].cycle.stem(), Stem::Gap);
        assert_eq!(periods[0].cycle.branch(), Branch::Jin);
        assert_eq!(periods[0].label, 35);
        assert_eq!(periods[0].calendar_year, 2024);
    }

    #[test]
    fn saeun_rejects_reversed_range() {
        let chart = chart_1990();
        assert!(matches!(
            saeun(&chart, 2026, 2024),
            Err(SearchError::InvalidRange(_))
        ));
    }

    #[test]
    fn wolun_marks_exactly_one_current_month() {
        let engine = TermEngine::new();
        let chart = chart_1990();
        let now = LocalDateTime::new(2024, 5, 15, 12, 0, 0.0);
        let entries = wolun(&engine, &chart, 2024, &now).unwrap();
        assert_eq!(entries.len(), 12);
        let current: Vec<&WolunEntry> = entries.iter().filter(|e| e.is_current).collect();
        assert_eq!(current.len(), 1);
        // Mid-May sits in the Ipha month, ordinal 4.
        assert_eq!(current[0].term, SolarTerm::Ipha);
        assert_eq!(current[0].period.label, 4);
    }

    #[test]
    fn wolun_outside_year_marks_nothing_current() {
        let engine = TermEngine::new();
        let chart = chart_1990();
        let now = LocalDateTime::new(1999, 7, 1, 0, 0, 0.0);
        let entries = wolun(&engine, &chart, 2024, &now).unwrap();
        assert!(entries.iter().all(|e| !e.is_current));
    }

    #[test]
    fn wolun_ordinals_cover_the_year() {
        let engine = TermEngine::new();
        let chart = chart_1990();
        let now = LocalDateTime::new(2024, 1, 1, 0, 0, 0.0);
        let entries = wolun(&engine, &chart, 2024, &now).unwrap();
        let ordinals: Vec<i32> = entries.iter().map(|e| e.period.label).collect();
        assert_eq!(ordinals, (1..=12).collect::<Vec<i32>>());
    }
}
