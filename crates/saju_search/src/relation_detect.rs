//! Structural-relation detection over a chart's adjacent pillars.
//!
//! Pairwise relations are reported for adjacent positions only (hour-day,
//! day-month, month-year); triple relations for consecutive position
//! windows of three. Duplicate findings are kept, so the same branch pair
//! may surface as both a clash and a punishment.

use saju_base::{
    Element,
    relations::{
        branch_break, branch_clash, branch_directional_combine, branch_half_combine,
        branch_harm, branch_punishment, branch_six_combine, branch_triple_combine,
        branch_triple_punishment, self_punishment, stem_clash, stem_combine,
    },
};
use saju_chart::{Chart, Position};

/// Kind of detected relation, with the resulting element where the
/// relation converts one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    StemCombine { element: Element },
    StemClash,
    SixCombine { element: Element },
    HalfCombine { element: Element },
    BranchClash,
    Punishment,
    SelfPunishment,
    Break,
    Harm,
    TripleCombine { element: Element },
    DirectionalCombine { element: Element },
    TriplePunishment,
}

impl RelationKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::StemCombine { .. } => "stem combine",
            Self::StemClash => "stem clash",
            Self::SixCombine { .. } => "six combine",
            Self::HalfCombine { .. } => "half combine",
            Self::BranchClash => "branch clash",
            Self::Punishment => "punishment",
            Self::SelfPunishment => "self punishment",
            Self::Break => "break",
            Self::Harm => "harm",
            Self::TripleCombine { .. } => "triple combine",
            Self::DirectionalCombine { .. } => "directional combine",
            Self::TriplePunishment => "triple punishment",
        }
    }

    /// The element a combine converts to, if any.
    pub const fn resulting_element(self) -> Option<Element> {
        match self {
            Self::StemCombine { element }
            | Self::SixCombine { element }
            | Self::HalfCombine { element }
            | Self::TripleCombine { element }
            | Self::DirectionalCombine { element } => Some(element),
            _ => None,
        }
    }
}

/// One detected relation and the positions it spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,
    pub positions: Vec<Position>,
}

impl Relation {
    pub fn is_triple(&self) -> bool {
        self.positions.len() == 3
    }
}

/// Detect every structural relation among the chart's active pillars.
pub fn detect_relations(chart: &Chart, has_hour: bool) -> Vec<Relation> {
    let active = chart.active_pillars(has_hour);
    let mut out = Vec::new();

    let mut push = |kind: RelationKind, positions: &[Position]| {
        out.push(Relation {
            kind,
            positions: positions.to_vec(),
        });
    };

    for pair in active.windows(2) {
        let (pos_a, pillar_a) = pair[0];
        let (pos_b, pillar_b) = pair[1];
        let span = [pos_a, pos_b];

        let (sa, sb) = (pillar_a.stem(), pillar_b.stem());
        if let Some(element) = stem_combine(sa, sb) {
            push(RelationKind::StemCombine { element }, &span);
        }
        if stem_clash(sa, sb) {
            push(RelationKind::StemClash, &span);
        }

        let (ba, bb) = (pillar_a.branch(), pillar_b.branch());
        if let Some(element) = branch_six_combine(ba, bb) {
            push(RelationKind::SixCombine { element }, &span);
        }
        if let Some(element) = branch_half_combine(ba, bb) {
            push(RelationKind::HalfCombine { element }, &span);
        }
        if branch_clash(ba, bb) {
            push(RelationKind::BranchClash, &span);
        }
        if branch_punishment(ba, bb) {
            push(RelationKind::Punishment, &span);
        }
        if ba == bb && self_punishment(ba) {
            push(RelationKind::SelfPunishment, &span);
        }
        if branch_break(ba, bb) {
            push(RelationKind::Break, &span);
        }
        if branch_harm(ba, bb) {
            push(RelationKind::Harm, &span);
        }
    }

    for triple in active.windows(3) {
        let (pos_a, pillar_a) = triple[0];
        let (pos_b, pillar_b) = triple[1];
        let (pos_c, pillar_c) = triple[2];
        let span = [pos_a, pos_b, pos_c];
        let (ba, bb, bc) = (pillar_a.branch(), pillar_b.branch(), pillar_c.branch());

        if let Some(element) = branch_triple_combine(ba, bb, bc) {
            push(RelationKind::TripleCombine { element }, &span);
        }
        if let Some(element) = branch_directional_combine(ba, bb, bc) {
            push(RelationKind::DirectionalCombine { element }, &span);
        }
        if branch_triple_punishment(ba, bb, bc) {
            push(RelationKind::TriplePunishment, &span);
        }
    }

    out
}
