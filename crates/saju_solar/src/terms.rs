//! The 12 month-boundary solar terms (jeolgi) of the saju calendar.
//!
//! Of the 24 solar terms, only the 12 "jeol" terms open a sexagenary
//! month. Ipchun (315 deg) additionally opens the saju year. Each term is
//! keyed by its target solar longitude and a rough calendar seed date used
//! to start the bracketing scan.

/// The 12 month-opening solar terms, in saju-month order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarTerm {
    /// Start of spring, 315 deg. Opens the saju year.
    Ipchun,
    Gyeongchip,
    Cheongmyeong,
    Ipha,
    Mangjong,
    Soseo,
    Ipchu,
    Baengno,
    Hallo,
    Ipdong,
    Daeseol,
    /// Minor cold, 285 deg. Falls in January of the following calendar year.
    Sohan,
}

/// All 12 terms in saju-month order (index 0 = Ipchun = month ordinal 1).
pub const ALL_TERMS: [SolarTerm; 12] = [
    SolarTerm::Ipchun,
    SolarTerm::Gyeongchip,
    SolarTerm::Cheongmyeong,
    SolarTerm::Ipha,
    SolarTerm::Mangjong,
    SolarTerm::Soseo,
    SolarTerm::Ipchu,
    SolarTerm::Baengno,
    SolarTerm::Hallo,
    SolarTerm::Ipdong,
    SolarTerm::Daeseol,
    SolarTerm::Sohan,
];

impl SolarTerm {
    /// Romanized Korean name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ipchun => "Ipchun",
            Self::Gyeongchip => "Gyeongchip",
            Self::Cheongmyeong => "Cheongmyeong",
            Self::Ipha => "Ipha",
            Self::Mangjong => "Mangjong",
            Self::Soseo => "Soseo",
            Self::Ipchu => "Ipchu",
            Self::Baengno => "Baengno",
            Self::Hallo => "Hallo",
            Self::Ipdong => "Ipdong",
            Self::Daeseol => "Daeseol",
            Self::Sohan => "Sohan",
        }
    }

    /// Solar ecliptic longitude at which the term occurs, degrees.
    pub const fn target_longitude_deg(self) -> f64 {
        match self {
            Self::Ipchun => 315.0,
            Self::Gyeongchip => 345.0,
            Self::Cheongmyeong => 15.0,
            Self::Ipha => 45.0,
            Self::Mangjong => 75.0,
            Self::Soseo => 105.0,
            Self::Ipchu => 135.0,
            Self::Baengno => 165.0,
            Self::Hallo => 195.0,
            Self::Ipdong => 225.0,
            Self::Daeseol => 255.0,
            Self::Sohan => 285.0,
        }
    }

    /// Saju month ordinal opened by this term (1-12; 1 = tiger month).
    pub const fn month_ordinal(self) -> u32 {
        self.index() as u32 + 1
    }

    /// Position in [`ALL_TERMS`].
    pub const fn index(self) -> usize {
        match self {
            Self::Ipchun => 0,
            Self::Gyeongchip => 1,
            Self::Cheongmyeong => 2,
            Self::Ipha => 3,
            Self::Mangjong => 4,
            Self::Soseo => 5,
            Self::Ipchu => 6,
            Self::Baengno => 7,
            Self::Hallo => 8,
            Self::Ipdong => 9,
            Self::Daeseol => 10,
            Self::Sohan => 11,
        }
    }

    /// Term for a saju month ordinal (1-12).
    pub const fn from_month_ordinal(ordinal: u32) -> Option<Self> {
        if ordinal >= 1 && ordinal <= 12 {
            Some(ALL_TERMS[(ordinal - 1) as usize])
        } else {
            None
        }
    }

    /// Approximate civil date of the term within a saju year:
    /// `(calendar_year_offset, month, day)`. Sohan belongs to January of
    /// the following calendar year.
    pub const fn approx_civil_date(self) -> (i32, u32, u32) {
        match self {
            Self::Ipchun => (0, 2, 4),
            Self::Gyeongchip => (0, 3, 6),
            Self::Cheongmyeong => (0, 4, 5),
            Self::Ipha => (0, 5, 6),
            Self::Mangjong => (0, 6, 6),
            Self::Soseo => (0, 7, 7),
            Self::Ipchu => (0, 8, 8),
            Self::Baengno => (0, 9, 8),
            Self::Hallo => (0, 10, 8),
            Self::Ipdong => (0, 11, 7),
            Self::Daeseol => (0, 12, 7),
            Self::Sohan => (1, 1, 6),
        }
    }
}
