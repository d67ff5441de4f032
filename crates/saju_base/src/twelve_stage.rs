//! Twelve-stage (sibiunseong) life-cycle classification of a branch
//! relative to a stem.
//!
//! Each stem has a fixed birth (Jangsaeng) branch; yang stems walk the
//! branch cycle forward from it, yin stems walk backward.

use crate::branch::Branch;
use crate::stem::Stem;

/// The 12 life-cycle stages in forward order from birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwelveStage {
    /// Birth (jangsaeng).
    Jangsaeng,
    /// Bathing (mokyok).
    Mokyok,
    /// Coming of age (gwandae).
    Gwandae,
    /// Establishment (geonrok).
    Geonrok,
    /// Peak (jewang).
    Jewang,
    /// Decline (soe).
    Soe,
    /// Illness (byeong).
    Byeong,
    /// Death (sa).
    Sa,
    /// Tomb (myo).
    Myo,
    /// Severance (jeol).
    Jeol,
    /// Conception (tae).
    Tae,
    /// Gestation (yang).
    Yang,
}

/// All 12 stages in forward order.
pub const ALL_STAGES: [TwelveStage; 12] = [
    TwelveStage::Jangsaeng,
    TwelveStage::Mokyok,
    TwelveStage::Gwandae,
    TwelveStage::Geonrok,
    TwelveStage::Jewang,
    TwelveStage::Soe,
    TwelveStage::Byeong,
    TwelveStage::Sa,
    TwelveStage::Myo,
    TwelveStage::Jeol,
    TwelveStage::Tae,
    TwelveStage::Yang,
];

impl TwelveStage {
    pub const fn index(self) -> usize {
        match self {
            Self::Jangsaeng => 0,
            Self::Mokyok => 1,
            Self::Gwandae => 2,
            Self::Geonrok => 3,
            Self::Jewang => 4,
            Self::Soe => 5,
            Self::Byeong => 6,
            Self::Sa => 7,
            Self::Myo => 8,
            Self::Jeol => 9,
            Self::Tae => 10,
            Self::Yang => 11,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Jangsaeng => "Jangsaeng",
            Self::Mokyok => "Mokyok",
            Self::Gwandae => "Gwandae",
            Self::Geonrok => "Geonrok",
            Self::Jewang => "Jewang",
            Self::Soe => "Soe",
            Self::Byeong => "Byeong",
            Self::Sa => "Sa",
            Self::Myo => "Myo",
            Self::Jeol => "Jeol",
            Self::Tae => "Tae",
            Self::Yang => "Yang",
        }
    }
}

/// Jangsaeng (birth-stage) branch for each stem.
const fn birth_branch(stem: Stem) -> Branch {
    match stem {
        Stem::Gap => Branch::Hae,
        Stem::Eul => Branch::O,
        Stem::Byeong | Stem::Mu => Branch::In,
        Stem::Jeong | Stem::Gi => Branch::Yu,
        Stem::Gyeong => Branch::Sa,
        Stem::Sin => Branch::Ja,
        Stem::Im => Branch::Sin,
        Stem::Gye => Branch::Myo,
    }
}

/// Twelve-stage phase of `branch` relative to `stem`.
pub const fn twelve_stage(stem: Stem, branch: Branch) -> TwelveStage {
    let start = birth_branch(stem).index() as i64;
    let b = branch.index() as i64;
    let steps = if stem.is_yang() {
        (b - start).rem_euclid(12)
    } else {
        (start - b).rem_euclid(12)
    };
    ALL_STAGES[steps as usize]
}
