//! Four-pillar chart construction from a birth instant.
//!
//! The day pillar follows the zi-hour rollover rule (23:30), the year
//! pillar follows the Ipchun boundary, and the month pillar is located
//! inside the 12(+1) solar-term boundaries of the saju year.

use saju_base::{
    Branch, CycleIndex, HiddenStem, Stem, TenGod, TwelveStage, hour_branch_for_minutes, ten_god,
    twelve_stage,
};
use saju_solar::{SolarTerm, TermBoundary, TermEngine};
use saju_time::{LocalDateTime, ZI_HOUR_START_MINUTES};

use crate::error::ChartError;

/// The four chart positions, ordered hour -> day -> month -> year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Hour,
    Day,
    Month,
    Year,
}

/// All positions in adjacency order.
pub const ALL_POSITIONS: [Position; 4] = [Position::Hour, Position::Day, Position::Month, Position::Year];

impl Position {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// One hidden stem of a pillar's branch, annotated against the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiddenAnnotation {
    pub stem: Stem,
    pub days: u8,
    pub ten_god: TenGod,
}

/// A chart pillar: the sexagenary index plus its day-master annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Pillar {
    pub cycle: CycleIndex,
    /// Ten-god of the pillar stem against the day stem.
    pub stem_ten_god: TenGod,
    /// Ten-god of the branch's principal hidden stem against the day stem.
    pub branch_ten_god: TenGod,
    /// Twelve-stage phase of the branch relative to the day stem.
    pub stage: TwelveStage,
    /// Full hidden-stem decomposition of the branch.
    pub hidden: Vec<HiddenAnnotation>,
}

impl Pillar {
    fn annotate(cycle: CycleIndex, day_stem: Stem) -> Self {
        let branch = cycle.branch();
        let hidden = branch
            .hidden_stems()
            .iter()
            .map(|h: &HiddenStem| HiddenAnnotation {
                stem: h.stem,
                days: h.days,
                ten_god: ten_god(day_stem, h.stem),
            })
            .collect();
        Self {
            cycle,
            stem_ten_god: ten_god(day_stem, cycle.stem()),
            branch_ten_god: ten_god(day_stem, branch.main_hidden_stem()),
            stage: twelve_stage(day_stem, branch),
            hidden,
        }
    }

    pub fn stem(&self) -> Stem {
        self.cycle.stem()
    }

    pub fn branch(&self) -> Branch {
        self.cycle.branch()
    }
}

/// The solar-term context that placed the month and year pillars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermContext {
    /// Saju year in effect at birth (calendar year - 1 before Ipchun).
    pub saju_year: i32,
    /// Month ordinal within the saju year (1-12, 1 = tiger month).
    pub month_ordinal: u32,
    /// Boundary opening the birth month.
    pub current: TermBoundary,
    /// Boundary opening the following month.
    pub next: TermBoundary,
}

/// Birth input for chart construction. `time` is `(hour, minute)`;
/// `None` when the birth time is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub time: Option<(u32, u32)>,
}

/// An immutable four-pillar chart. A pure function of the birth input.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub birth: LocalDateTime,
    pub has_hour: bool,
    pub hour: Option<Pillar>,
    pub day: Pillar,
    pub month: Pillar,
    pub year: Pillar,
    pub terms: TermContext,
}

impl Chart {
    pub fn day_stem(&self) -> Stem {
        self.day.cycle.stem()
    }

    /// Active pillars in adjacency order (hour first when present).
    pub fn active_pillars(&self, has_hour: bool) -> Vec<(Position, &Pillar)> {
        let mut out = Vec::with_capacity(4);
        if has_hour {
            if let Some(hour) = &self.hour {
                out.push((Position::Hour, hour));
            }
        }
        out.push((Position::Day, &self.day));
        out.push((Position::Month, &self.month));
        out.push((Position::Year, &self.year));
        out
    }

    pub fn pillar(&self, position: Position) -> Option<&Pillar> {
        match position {
            Position::Hour => self.hour.as_ref(),
            Position::Day => Some(&self.day),
            Position::Month => Some(&self.month),
            Position::Year => Some(&self.year),
        }
    }
}

fn cycle_or_miss(stem: Stem, branch: Branch) -> Result<CycleIndex, ChartError> {
    CycleIndex::from_stem_branch(stem, branch)
        .ok_or(ChartError::PillarLookupMiss { stem, branch })
}

/// Build a chart from a birth date and optional time.
pub fn build_chart(engine: &TermEngine, input: &BirthInput) -> Result<Chart, ChartError> {
    let (hour, minute) = input.time.unwrap_or((0, 0));
    let birth = LocalDateTime::new(input.year, input.month, input.day, hour, minute, 0.0);
    birth.validate()?;
    let has_hour = input.time.is_some();
    let birth_jd = birth.to_jd();

    // Day pillar, with the zi-hour day rollover.
    let saju_day = if has_hour && birth.minutes_of_day() >= ZI_HOUR_START_MINUTES {
        birth.offset_days(1)
    } else {
        birth
    };
    let day_cycle = CycleIndex::for_day(saju_day.year, saju_day.month, saju_day.day);
    let day_stem = day_cycle.stem();

    // Year pillar: births before this calendar year's Ipchun belong to the
    // previous saju year.
    let ipchun_jd = engine.find_term_jd(input.year, SolarTerm::Ipchun)?;
    let saju_year = if birth_jd < ipchun_jd {
        input.year - 1
    } else {
        input.year
    };
    let year_cycle = CycleIndex::for_year(saju_year);

    // Month pillar: locate the half-open boundary interval holding birth.
    let boundaries = engine.boundaries_for_year(saju_year)?;
    let mut month_ordinal = 0u32;
    for (i, pair) in boundaries.windows(2).enumerate() {
        if birth_jd >= pair[0].jd_local && birth_jd < pair[1].jd_local {
            month_ordinal = i as u32 + 1;
            break;
        }
    }
    if month_ordinal == 0 {
        return Err(ChartError::Internal("birth outside saju year boundaries"));
    }
    let current = boundaries[(month_ordinal - 1) as usize];
    let next = boundaries[month_ordinal as usize];

    let month_cycle = CycleIndex::for_month(year_cycle.stem(), month_ordinal)
        .ok_or(ChartError::Internal("month formula produced no pillar"))?;

    // Hour pillar.
    let hour_pillar = if has_hour {
        let branch = hour_branch_for_minutes(birth.minutes_of_day());
        let cycle = CycleIndex::for_hour(day_stem, branch)
            .ok_or(ChartError::Internal("hour formula produced no pillar"))?;
        Some(Pillar::annotate(cycle, day_stem))
    } else {
        None
    };

    // Round-trip each derived pair through the 60-cycle; a miss here is
    // the PillarLookupMiss invariant violation.
    let day_cycle = cycle_or_miss(day_cycle.stem(), day_cycle.branch())?;
    let year_cycle = cycle_or_miss(year_cycle.stem(), year_cycle.branch())?;
    let month_cycle = cycle_or_miss(month_cycle.stem(), month_cycle.branch())?;

    Ok(Chart {
        birth,
        has_hour,
        hour: hour_pillar,
        day: Pillar::annotate(day_cycle, day_stem),
        month: Pillar::annotate(month_cycle, day_stem),
        year: Pillar::annotate(year_cycle, day_stem),
        terms: TermContext {
            saju_year,
            month_ordinal,
            current,
            next,
        },
    })
}
