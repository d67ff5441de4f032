//! The twelve earthly branches (jiji) and their hidden-stem decomposition.

use crate::element::Element;
use crate::stem::Stem;

/// The 12 branches in cycle order, starting at Ja (rat).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

/// All 12 branches in order (0 = Ja .. 11 = Hae).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

impl Branch {
    pub const fn index(self) -> u8 {
        match self {
            Self::Ja => 0,
            Self::Chuk => 1,
            Self::In => 2,
            Self::Myo => 3,
            Self::Jin => 4,
            Self::Sa => 5,
            Self::O => 6,
            Self::Mi => 7,
            Self::Sin => 8,
            Self::Yu => 9,
            Self::Sul => 10,
            Self::Hae => 11,
        }
    }

    /// Branch for an index, wrapping modulo 12.
    pub const fn from_index(idx: u8) -> Self {
        ALL_BRANCHES[(idx % 12) as usize]
    }

    /// Romanized Korean name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ja => "Ja",
            Self::Chuk => "Chuk",
            Self::In => "In",
            Self::Myo => "Myo",
            Self::Jin => "Jin",
            Self::Sa => "Sa",
            Self::O => "O",
            Self::Mi => "Mi",
            Self::Sin => "Sin",
            Self::Yu => "Yu",
            Self::Sul => "Sul",
            Self::Hae => "Hae",
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Ja | Self::Hae => Element::Water,
            Self::In | Self::Myo => Element::Wood,
            Self::Sa | Self::O => Element::Fire,
            Self::Sin | Self::Yu => Element::Metal,
            Self::Chuk | Self::Jin | Self::Mi | Self::Sul => Element::Earth,
        }
    }

    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// True for the four cardinal (wangji) branches Ja, Myo, O, Yu — the
    /// dominant members of their seasonal triads.
    pub const fn is_dominant(self) -> bool {
        matches!(self, Self::Ja | Self::Myo | Self::O | Self::Yu)
    }

    /// Hidden stems of this branch with their qi-share day counts
    /// (out of 30). The last entry is the principal (main) hidden stem.
    pub const fn hidden_stems(self) -> &'static [HiddenStem] {
        match self {
            Self::Ja => &HS_JA,
            Self::Chuk => &HS_CHUK,
            Self::In => &HS_IN,
            Self::Myo => &HS_MYO,
            Self::Jin => &HS_JIN,
            Self::Sa => &HS_SA,
            Self::O => &HS_O,
            Self::Mi => &HS_MI,
            Self::Sin => &HS_SIN,
            Self::Yu => &HS_YU,
            Self::Sul => &HS_SUL,
            Self::Hae => &HS_HAE,
        }
    }

    /// The principal hidden stem (jeonggi) of this branch.
    pub const fn main_hidden_stem(self) -> Stem {
        let stems = self.hidden_stems();
        stems[stems.len() - 1].stem
    }
}

// Traditional qi-share day-count tables (yeogi/junggi/jeonggi, 30 days).
const HS_JA: [HiddenStem; 2] = [hs(Stem::Im, 10), hs(Stem::Gye, 20)];
const HS_CHUK: [HiddenStem; 3] = [hs(Stem::Gye, 9), hs(Stem::Sin, 3), hs(Stem::Gi, 18)];
const HS_IN: [HiddenStem; 3] = [hs(Stem::Mu, 7), hs(Stem::Byeong, 7), hs(Stem::Gap, 16)];
const HS_MYO: [HiddenStem; 2] = [hs(Stem::Gap, 10), hs(Stem::Eul, 20)];
const HS_JIN: [HiddenStem; 3] = [hs(Stem::Eul, 9), hs(Stem::Gye, 3), hs(Stem::Mu, 18)];
const HS_SA: [HiddenStem; 3] = [hs(Stem::Mu, 7), hs(Stem::Gyeong, 7), hs(Stem::Byeong, 16)];
const HS_O: [HiddenStem; 3] = [hs(Stem::Byeong, 10), hs(Stem::Gi, 9), hs(Stem::Jeong, 11)];
const HS_MI: [HiddenStem; 3] = [hs(Stem::Jeong, 9), hs(Stem::Eul, 3), hs(Stem::Gi, 18)];
const HS_SIN: [HiddenStem; 3] = [hs(Stem::Mu, 7), hs(Stem::Im, 7), hs(Stem::Gyeong, 16)];
const HS_YU: [HiddenStem; 2] = [hs(Stem::Gyeong, 10), hs(Stem::Sin, 20)];
const HS_SUL: [HiddenStem; 3] = [hs(Stem::Sin, 9), hs(Stem::Jeong, 3), hs(Stem::Mu, 18)];
const HS_HAE: [HiddenStem; 3] = [hs(Stem::Mu, 7), hs(Stem::Gap, 7), hs(Stem::Im, 16)];

/// One hidden stem inside a branch and its qi-share in days out of 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiddenStem {
    pub stem: Stem,
    pub days: u8,
}

impl HiddenStem {
    /// Fractional share of the branch's weight carried by this stem.
    pub const fn fraction(self) -> f64 {
        self.days as f64 / 30.0
    }
}

const fn hs(stem: Stem, days: u8) -> HiddenStem {
    HiddenStem { stem, days }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_stem_days_total_30_ish() {
        // The traditional day-count tables total 30 for every branch.
        for b in ALL_BRANCHES {
            let total: u32 = b.hidden_stems().iter().map(|h| h.days as u32).sum();
            assert_eq!(total, 30, "branch {}", b.name());
        }
    }

    #[test]
    fn main_hidden_stem_matches_branch_element() {
        for b in ALL_BRANCHES {
            assert_eq!(
                b.main_hidden_stem().element(),
                b.element(),
                "branch {}",
                b.name()
            );
        }
    }

    #[test]
    fn dominant_branches_are_the_cardinals() {
        let dominants: Vec<Branch> = ALL_BRANCHES.into_iter().filter(|b| b.is_dominant()).collect();
        assert_eq!(dominants, vec![Branch::Ja, Branch::Myo, Branch::O, Branch::Yu]);
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(Branch::from_index(12), Branch::Ja);
        assert_eq!(Branch::from_index(17), Branch::Sa);
    }
}
