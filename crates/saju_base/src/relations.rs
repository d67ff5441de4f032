//! Fixed structural-relation tables between stems and between branches:
//! combine, clash, punishment, break, and harm. All lookups are symmetric
//! in argument order; tables are data, never computed at runtime.

use crate::branch::Branch;
use crate::element::Element;
use crate::stem::Stem;

/// Stem five-combines (cheonganhap), each yielding an element.
pub const STEM_COMBINES: [(Stem, Stem, Element); 5] = [
    (Stem::Gap, Stem::Gi, Element::Earth),
    (Stem::Eul, Stem::Gyeong, Element::Metal),
    (Stem::Byeong, Stem::Sin, Element::Water),
    (Stem::Jeong, Stem::Im, Element::Wood),
    (Stem::Mu, Stem::Gye, Element::Fire),
];

/// Stem clashes (cheonganchung).
pub const STEM_CLASHES: [(Stem, Stem); 4] = [
    (Stem::Gap, Stem::Gyeong),
    (Stem::Eul, Stem::Sin),
    (Stem::Byeong, Stem::Im),
    (Stem::Jeong, Stem::Gye),
];

/// Branch six-combines (yukhap), each yielding an element.
pub const BRANCH_SIX_COMBINES: [(Branch, Branch, Element); 6] = [
    (Branch::Ja, Branch::Chuk, Element::Earth),
    (Branch::In, Branch::Hae, Element::Wood),
    (Branch::Myo, Branch::Sul, Element::Fire),
    (Branch::Jin, Branch::Yu, Element::Metal),
    (Branch::Sa, Branch::Sin, Element::Water),
    (Branch::O, Branch::Mi, Element::Fire),
];

/// Branch clashes (chung): opposite branches on the 12-wheel.
pub const BRANCH_CLASHES: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::O),
    (Branch::Chuk, Branch::Mi),
    (Branch::In, Branch::Sin),
    (Branch::Myo, Branch::Yu),
    (Branch::Jin, Branch::Sul),
    (Branch::Sa, Branch::Hae),
];

/// Pairwise punishments (hyeong): the member pairs of the two triple
/// patterns plus the Ja-Myo rudeness punishment.
pub const BRANCH_PUNISHMENTS: [(Branch, Branch); 7] = [
    (Branch::In, Branch::Sa),
    (Branch::Sa, Branch::Sin),
    (Branch::In, Branch::Sin),
    (Branch::Chuk, Branch::Sul),
    (Branch::Sul, Branch::Mi),
    (Branch::Chuk, Branch::Mi),
    (Branch::Ja, Branch::Myo),
];

/// The two triple punishment patterns.
pub const TRIPLE_PUNISHMENTS: [[Branch; 3]; 2] = [
    [Branch::In, Branch::Sa, Branch::Sin],
    [Branch::Chuk, Branch::Sul, Branch::Mi],
];

/// Branches that punish themselves (jahyeong).
pub const SELF_PUNISHMENTS: [Branch; 4] = [Branch::Jin, Branch::O, Branch::Yu, Branch::Hae];

/// Branch breaks (pa).
pub const BRANCH_BREAKS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::Yu),
    (Branch::Chuk, Branch::Jin),
    (Branch::In, Branch::Hae),
    (Branch::Myo, Branch::O),
    (Branch::Sa, Branch::Sin),
    (Branch::Mi, Branch::Sul),
];

/// Branch harms (hae).
pub const BRANCH_HARMS: [(Branch, Branch); 6] = [
    (Branch::Ja, Branch::Mi),
    (Branch::Chuk, Branch::O),
    (Branch::In, Branch::Sa),
    (Branch::Myo, Branch::Jin),
    (Branch::Sin, Branch::Hae),
    (Branch::Yu, Branch::Sul),
];

/// Seasonal triple-combines (samhap), each yielding an element. The
/// middle member is the dominant (wangji) branch.
pub const TRIPLE_COMBINES: [([Branch; 3], Element); 4] = [
    ([Branch::Sin, Branch::Ja, Branch::Jin], Element::Water),
    ([Branch::In, Branch::O, Branch::Sul], Element::Fire),
    ([Branch::Sa, Branch::Yu, Branch::Chuk], Element::Metal),
    ([Branch::Hae, Branch::Myo, Branch::Mi], Element::Wood),
];

/// Directional combines (banghap): the three branches of each season.
pub const DIRECTIONAL_COMBINES: [([Branch; 3], Element); 4] = [
    ([Branch::In, Branch::Myo, Branch::Jin], Element::Wood),
    ([Branch::Sa, Branch::O, Branch::Mi], Element::Fire),
    ([Branch::Sin, Branch::Yu, Branch::Sul], Element::Metal),
    ([Branch::Hae, Branch::Ja, Branch::Chuk], Element::Water),
];

/// Half-combines (banhap): a wangji branch paired with either other
/// member of its triad, yielding the triad element.
pub const HALF_COMBINES: [(Branch, Branch, Element); 8] = [
    (Branch::Sin, Branch::Ja, Element::Water),
    (Branch::Ja, Branch::Jin, Element::Water),
    (Branch::In, Branch::O, Element::Fire),
    (Branch::O, Branch::Sul, Element::Fire),
    (Branch::Sa, Branch::Yu, Element::Metal),
    (Branch::Yu, Branch::Chuk, Element::Metal),
    (Branch::Hae, Branch::Myo, Element::Wood),
    (Branch::Myo, Branch::Mi, Element::Wood),
];

fn pair_eq<T: PartialEq + Copy>(pair: (T, T), a: T, b: T) -> bool {
    (pair.0 == a && pair.1 == b) || (pair.0 == b && pair.1 == a)
}

/// Stem combine lookup; returns the resulting element.
pub fn stem_combine(a: Stem, b: Stem) -> Option<Element> {
    STEM_COMBINES
        .iter()
        .find(|&&(x, y, _)| pair_eq((x, y), a, b))
        .map(|&(_, _, e)| e)
}

pub fn stem_clash(a: Stem, b: Stem) -> bool {
    STEM_CLASHES.iter().any(|&p| pair_eq(p, a, b))
}

/// Branch six-combine lookup; returns the resulting element.
pub fn branch_six_combine(a: Branch, b: Branch) -> Option<Element> {
    BRANCH_SIX_COMBINES
        .iter()
        .find(|&&(x, y, _)| pair_eq((x, y), a, b))
        .map(|&(_, _, e)| e)
}

pub fn branch_clash(a: Branch, b: Branch) -> bool {
    BRANCH_CLASHES.iter().any(|&p| pair_eq(p, a, b))
}

pub fn branch_punishment(a: Branch, b: Branch) -> bool {
    BRANCH_PUNISHMENTS.iter().any(|&p| pair_eq(p, a, b))
}

pub fn self_punishment(branch: Branch) -> bool {
    SELF_PUNISHMENTS.contains(&branch)
}

pub fn branch_break(a: Branch, b: Branch) -> bool {
    BRANCH_BREAKS.iter().any(|&p| pair_eq(p, a, b))
}

pub fn branch_harm(a: Branch, b: Branch) -> bool {
    BRANCH_HARMS.iter().any(|&p| pair_eq(p, a, b))
}

/// Half-combine lookup; returns the triad element.
pub fn branch_half_combine(a: Branch, b: Branch) -> Option<Element> {
    HALF_COMBINES
        .iter()
        .find(|&&(x, y, _)| pair_eq((x, y), a, b))
        .map(|&(_, _, e)| e)
}

fn triple_matches(pattern: &[Branch; 3], a: Branch, b: Branch, c: Branch) -> bool {
    pattern.contains(&a)
        && pattern.contains(&b)
        && pattern.contains(&c)
        && a != b
        && b != c
        && a != c
}

/// Triple-combine lookup over an unordered branch triple.
pub fn branch_triple_combine(a: Branch, b: Branch, c: Branch) -> Option<Element> {
    TRIPLE_COMBINES
        .iter()
        .find(|(pat, _)| triple_matches(pat, a, b, c))
        .map(|&(_, e)| e)
}

/// Directional-combine lookup over an unordered branch triple.
pub fn branch_directional_combine(a: Branch, b: Branch, c: Branch) -> Option<Element> {
    DIRECTIONAL_COMBINES
        .iter()
        .find(|(pat, _)| triple_matches(pat, a, b, c))
        .map(|&(_, e)| e)
}

/// Triple-punishment lookup over an unordered branch triple.
pub fn branch_triple_punishment(a: Branch, b: Branch, c: Branch) -> bool {
    TRIPLE_PUNISHMENTS
        .iter()
        .any(|pat| triple_matches(pat, a, b, c))
}

/// True when any triple-punishment pattern is fully present in `branches`.
pub fn contains_triple_punishment(branches: &[Branch]) -> bool {
    TRIPLE_PUNISHMENTS
        .iter()
        .any(|pat| pat.iter().all(|m| branches.contains(m)))
}
