//! The ten heavenly stems (cheongan).

use crate::element::Element;

/// The 10 stems in cycle order. Even indices are yang, odd are yin;
/// consecutive pairs share an element (Wood, Fire, Earth, Metal, Water).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

/// All 10 stems in order (0 = Gap .. 9 = Gye).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

impl Stem {
    pub const fn index(self) -> u8 {
        match self {
            Self::Gap => 0,
            Self::Eul => 1,
            Self::Byeong => 2,
            Self::Jeong => 3,
            Self::Mu => 4,
            Self::Gi => 5,
            Self::Gyeong => 6,
            Self::Sin => 7,
            Self::Im => 8,
            Self::Gye => 9,
        }
    }

    /// Stem for an index, wrapping modulo 10.
    pub const fn from_index(idx: u8) -> Self {
        ALL_STEMS[(idx % 10) as usize]
    }

    /// Romanized Korean name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gap => "Gap",
            Self::Eul => "Eul",
            Self::Byeong => "Byeong",
            Self::Jeong => "Jeong",
            Self::Mu => "Mu",
            Self::Gi => "Gi",
            Self::Gyeong => "Gyeong",
            Self::Sin => "Sin",
            Self::Im => "Im",
            Self::Gye => "Gye",
        }
    }

    pub const fn element(self) -> Element {
        Element::from_index((self.index() / 2) as usize)
    }

    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }
}

impl Element {
    /// Yang stem of this element (used when a converted element must be
    /// attributed to a concrete stem).
    pub const fn yang_stem(self) -> Stem {
        Stem::from_index((self.index() * 2) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elements_pair_up() {
        assert_eq!(Stem::Gap.element(), Element::Wood);
        assert_eq!(Stem::Eul.element(), Element::Wood);
        assert_eq!(Stem::Mu.element(), Element::Earth);
        assert_eq!(Stem::Gye.element(), Element::Water);
    }

    #[test]
    fn polarity_alternates() {
        assert!(Stem::Gap.is_yang());
        assert!(!Stem::Eul.is_yang());
        assert!(Stem::Gyeong.is_yang());
    }

    #[test]
    fn yang_stem_of_element() {
        assert_eq!(Element::Wood.yang_stem(), Stem::Gap);
        assert_eq!(Element::Water.yang_stem(), Stem::Im);
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(Stem::from_index(10), Stem::Gap);
        assert_eq!(Stem::from_index(13), Stem::Jeong);
    }
}
