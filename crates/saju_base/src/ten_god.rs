//! Ten-god (sipsin) classification: the relation of any stem to the day
//! master, from element distance crossed with polarity match.

use crate::element::Element;
use crate::stem::Stem;

/// The ten gods, paired by group (same-parity first in each pair).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenGod {
    /// Peer, same polarity (bigyeon).
    Friend,
    /// Peer, opposite polarity (geopjae).
    RobWealth,
    /// Output, same polarity (siksin).
    Gourmet,
    /// Output, opposite polarity (sanggwan).
    Performer,
    /// Wealth, same polarity (pyeonjae).
    WindfallWealth,
    /// Wealth, opposite polarity (jeongjae).
    ProperWealth,
    /// Authority, same polarity (pyeongwan).
    Challenger,
    /// Authority, opposite polarity (jeonggwan).
    ProperAuthority,
    /// Resource, same polarity (pyeonin).
    UnconventionalScholar,
    /// Resource, opposite polarity (jeongin).
    ProperScholar,
}

/// All ten gods, index order matching histogram slots.
pub const ALL_TEN_GODS: [TenGod; 10] = [
    TenGod::Friend,
    TenGod::RobWealth,
    TenGod::Gourmet,
    TenGod::Performer,
    TenGod::WindfallWealth,
    TenGod::ProperWealth,
    TenGod::Challenger,
    TenGod::ProperAuthority,
    TenGod::UnconventionalScholar,
    TenGod::ProperScholar,
];

impl TenGod {
    pub const fn index(self) -> usize {
        match self {
            Self::Friend => 0,
            Self::RobWealth => 1,
            Self::Gourmet => 2,
            Self::Performer => 3,
            Self::WindfallWealth => 4,
            Self::ProperWealth => 5,
            Self::Challenger => 6,
            Self::ProperAuthority => 7,
            Self::UnconventionalScholar => 8,
            Self::ProperScholar => 9,
        }
    }

    /// Romanized Korean name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Friend => "Bigyeon",
            Self::RobWealth => "Geopjae",
            Self::Gourmet => "Siksin",
            Self::Performer => "Sanggwan",
            Self::WindfallWealth => "Pyeonjae",
            Self::ProperWealth => "Jeongjae",
            Self::Challenger => "Pyeongwan",
            Self::ProperAuthority => "Jeonggwan",
            Self::UnconventionalScholar => "Pyeonin",
            Self::ProperScholar => "Jeongin",
        }
    }

    pub const fn group(self) -> TenGodGroup {
        match self {
            Self::Friend | Self::RobWealth => TenGodGroup::Peer,
            Self::Gourmet | Self::Performer => TenGodGroup::Output,
            Self::WindfallWealth | Self::ProperWealth => TenGodGroup::Wealth,
            Self::Challenger | Self::ProperAuthority => TenGodGroup::Authority,
            Self::UnconventionalScholar | Self::ProperScholar => TenGodGroup::Resource,
        }
    }
}

/// The five ten-god groups (pairs collapsed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenGodGroup {
    Peer,
    Output,
    Wealth,
    Authority,
    Resource,
}

pub const ALL_TEN_GOD_GROUPS: [TenGodGroup; 5] = [
    TenGodGroup::Peer,
    TenGodGroup::Output,
    TenGodGroup::Wealth,
    TenGodGroup::Authority,
    TenGodGroup::Resource,
];

impl TenGodGroup {
    pub const fn index(self) -> usize {
        match self {
            Self::Peer => 0,
            Self::Output => 1,
            Self::Wealth => 2,
            Self::Authority => 3,
            Self::Resource => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Peer => "Bigyeop",
            Self::Output => "Siksang",
            Self::Wealth => "Jaeseong",
            Self::Authority => "Gwanseong",
            Self::Resource => "Inseong",
        }
    }

    /// Group an element falls into relative to a day-master element.
    pub const fn for_elements(day: Element, other: Element) -> Self {
        if day.index() == other.index() {
            Self::Peer
        } else if day.generates().index() == other.index() {
            Self::Output
        } else if day.overcomes().index() == other.index() {
            Self::Wealth
        } else if day.overcome_by().index() == other.index() {
            Self::Authority
        } else {
            Self::Resource
        }
    }
}

/// Classify `other` relative to the day master.
pub const fn ten_god(day_stem: Stem, other: Stem) -> TenGod {
    let same_parity = day_stem.is_yang() == other.is_yang();
    match TenGodGroup::for_elements(day_stem.element(), other.element()) {
        TenGodGroup::Peer => {
            if same_parity {
                TenGod::Friend
            } else {
                TenGod::RobWealth
            }
        }
        TenGodGroup::Output => {
            if same_parity {
                TenGod::Gourmet
            } else {
                TenGod::Performer
            }
        }
        TenGodGroup::Wealth => {
            if same_parity {
                TenGod::WindfallWealth
            } else {
                TenGod::ProperWealth
            }
        }
        TenGodGroup::Authority => {
            if same_parity {
                TenGod::Challenger
            } else {
                TenGod::ProperAuthority
            }
        }
        TenGodGroup::Resource => {
            if same_parity {
                TenGod::UnconventionalScholar
            } else {
                TenGod::ProperScholar
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stem::ALL_STEMS;

    #[test]
    fn day_master_is_its_own_friend() {
        for s in ALL_STEMS {
            assert_eq!(ten_god(s, s), TenGod::Friend);
        }
    }

    #[test]
    fn classic_pairings_for_gap_day() {
        // Gap (yang wood) day master.
        assert_eq!(ten_god(Stem::Gap, Stem::Eul), TenGod::RobWealth);
        assert_eq!(ten_god(Stem::Gap, Stem::Byeong), TenGod::Gourmet);
        assert_eq!(ten_god(Stem::Gap, Stem::Jeong), TenGod::Performer);
        assert_eq!(ten_god(Stem::Gap, Stem::Mu), TenGod::WindfallWealth);
        assert_eq!(ten_god(Stem::Gap, Stem::Gi), TenGod::ProperWealth);
        assert_eq!(ten_god(Stem::Gap, Stem::Gyeong), TenGod::Challenger);
        assert_eq!(ten_god(Stem::Gap, Stem::Sin), TenGod::ProperAuthority);
        assert_eq!(ten_god(Stem::Gap, Stem::Im), TenGod::UnconventionalScholar);
        assert_eq!(ten_god(Stem::Gap, Stem::Gye), TenGod::ProperScholar);
    }

    #[test]
    fn yin_day_master_flips_parity() {
        // Eul (yin wood): Gyeong (yang metal) overcomes it with opposite
        // parity, so ProperAuthority.
        assert_eq!(ten_god(Stem::Eul, Stem::Gyeong), TenGod::ProperAuthority);
        assert_eq!(ten_god(Stem::Eul, Stem::Sin), TenGod::Challenger);
    }

    #[test]
    fn groups_collapse_pairs() {
        assert_eq!(TenGod::Friend.group(), TenGodGroup::Peer);
        assert_eq!(TenGod::Performer.group(), TenGodGroup::Output);
        assert_eq!(TenGod::ProperScholar.group(), TenGodGroup::Resource);
    }
}
