//! Two-chart compatibility scoring.
//!
//! Six scored categories: branch structure, stem structure, element
//! cross-fill, attachment archetypes from ten-god groups, twelve-stage
//! bands, and special patterns. Category scores sum into a raw delta
//! applied to a neutral baseline of 50 and clamped to 0..=100. Every
//! adjustment appends a human-readable rationale line in scoring order.

use saju_base::{
    Branch, Element, TenGodGroup, TwelveStage,
    relations::{
        branch_clash, branch_half_combine, branch_six_combine, branch_triple_combine,
        contains_triple_punishment, stem_clash, stem_combine,
    },
};
use saju_chart::{
    Chart, Position, WeighConfig, Weighing, YongsinResult, resolve_yongsin, weigh,
};

/// Neutral starting total before category adjustments.
pub const BASELINE: f64 = 50.0;

/// Per-category score breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryScores {
    pub branch: f64,
    pub stem: f64,
    pub element: f64,
    pub ten_god_group: f64,
    pub twelve_stage: f64,
    pub special: f64,
}

impl CategoryScores {
    pub fn sum(&self) -> f64 {
        self.branch + self.stem + self.element + self.ten_god_group + self.twelve_stage
            + self.special
    }
}

/// Attachment archetype derived from the ten-god group balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Peer or output dominance with near-absent authority.
    Avoidant,
    /// Authority dominance with near-absent peer support.
    Anxious,
    /// Resource dominance, or no group in excess or collapse.
    Secure,
    /// None of the patterns apply.
    Mixed,
}

impl Attachment {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Avoidant => "avoidant",
            Self::Anxious => "anxious",
            Self::Secure => "secure",
            Self::Mixed => "mixed",
        }
    }

    const fn is_unstable(self) -> bool {
        matches!(self, Self::Avoidant | Self::Anxious)
    }
}

/// Full compatibility verdict for a chart pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityResult {
    pub scores: CategoryScores,
    /// Clamped `BASELINE + scores.sum()`.
    pub total: u32,
    pub attachment_a: Attachment,
    pub attachment_b: Attachment,
    pub shared_yongsin: bool,
    pub triple_punishment: bool,
    pub rationale: Vec<String>,
}

/// A group percentage at or above this counts as dominant.
const GROUP_DOMINANCE: u32 = 20;
/// A group percentage at or below this counts as collapsed.
const GROUP_DEFICIENCY: u32 = 5;
/// Element share at or above this counts as excess for cross-fill.
pub(crate) const ELEMENT_EXCESS: u32 = 30;
/// Element share at or below this counts as deficient for cross-fill.
pub(crate) const ELEMENT_DEFICIENCY: u32 = 15;

struct Person<'a> {
    chart: &'a Chart,
    has_hour: bool,
    weighing: Weighing,
    yongsin: YongsinResult,
}

impl<'a> Person<'a> {
    fn new(chart: &'a Chart, has_hour: bool) -> Self {
        let weighing = weigh(chart, has_hour, &WeighConfig::default());
        let yongsin = resolve_yongsin(&weighing.elements);
        Self {
            chart,
            has_hour,
            weighing,
            yongsin,
        }
    }

    fn branch(&self, position: Position) -> Option<Branch> {
        if position == Position::Hour && !self.has_hour {
            return None;
        }
        self.chart.pillar(position).map(|p| p.branch())
    }

    /// Ten-god group shares, indexed by [`TenGodGroup::index`].
    fn group_percentages(&self) -> [u32; 5] {
        let day_element = self.chart.day_stem().element();
        let mut groups = [0u32; 5];
        for (i, pct) in self.weighing.elements.percentages.iter().enumerate() {
            let group = TenGodGroup::for_elements(day_element, Element::from_index(i));
            groups[group.index()] += pct;
        }
        groups
    }
}

/// Positions scored pairwise, strongest first.
const SCORED_POSITIONS: [Position; 4] =
    [Position::Day, Position::Month, Position::Year, Position::Hour];

pub(crate) const fn branch_combine_bonus(position: Position) -> f64 {
    match position {
        Position::Day => 15.0,
        Position::Month => 10.0,
        Position::Year | Position::Hour => 5.0,
    }
}

pub(crate) const fn branch_half_bonus(position: Position) -> f64 {
    match position {
        Position::Day | Position::Month => 10.0,
        Position::Year | Position::Hour => 3.0,
    }
}

pub(crate) const fn branch_clash_penalty(position: Position) -> f64 {
    match position {
        Position::Month => -15.0,
        Position::Day => -10.0,
        Position::Year | Position::Hour => -5.0,
    }
}

pub(crate) const fn stem_position_weight(position: Position) -> f64 {
    match position {
        Position::Day => 1.0,
        Position::Month => 0.6,
        Position::Year | Position::Hour => 0.3,
    }
}

/// Attachment archetype for a group-percentage vector.
fn archetype(groups: &[u32; 5]) -> Attachment {
    let peer = groups[TenGodGroup::Peer.index()];
    let output = groups[TenGodGroup::Output.index()];
    let authority = groups[TenGodGroup::Authority.index()];
    let resource = groups[TenGodGroup::Resource.index()];
    let max = *groups.iter().max().unwrap_or(&0);
    let min = *groups.iter().min().unwrap_or(&0);

    if (peer >= GROUP_DOMINANCE || output >= GROUP_DOMINANCE) && authority <= GROUP_DEFICIENCY {
        Attachment::Avoidant
    } else if authority >= GROUP_DOMINANCE && peer <= GROUP_DEFICIENCY {
        Attachment::Anxious
    } else if resource >= GROUP_DOMINANCE || (max < GROUP_DOMINANCE && min > GROUP_DEFICIENCY) {
        Attachment::Secure
    } else {
        Attachment::Mixed
    }
}

fn dominant_group(groups: &[u32; 5]) -> TenGodGroup {
    let mut best = 0usize;
    for i in 1..5 {
        if groups[i] > groups[best] {
            best = i;
        }
    }
    [
        TenGodGroup::Peer,
        TenGodGroup::Output,
        TenGodGroup::Wealth,
        TenGodGroup::Authority,
        TenGodGroup::Resource,
    ][best]
}

/// Twelve-stage band for the stage-pair category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Growth,
    Peak,
    Decline,
}

const fn band(stage: TwelveStage) -> Band {
    match stage {
        TwelveStage::Jangsaeng | TwelveStage::Mokyok | TwelveStage::Gwandae => Band::Growth,
        TwelveStage::Geonrok | TwelveStage::Jewang | TwelveStage::Soe => Band::Peak,
        _ => Band::Decline,
    }
}

/// Score the compatibility of two charts.
pub fn score_compatibility(
    chart_a: &Chart,
    has_hour_a: bool,
    chart_b: &Chart,
    has_hour_b: bool,
) -> CompatibilityResult {
    let a = Person::new(chart_a, has_hour_a);
    let b = Person::new(chart_b, has_hour_b);

    let mut scores = CategoryScores::default();
    let mut rationale = Vec::new();
    let mut combine_found = false;

    score_branches(&a, &b, &mut scores, &mut rationale, &mut combine_found);
    score_stems(&a, &b, &mut scores, &mut rationale, &mut combine_found);
    score_elements(&a, &b, combine_found, &mut scores, &mut rationale);

    let groups_a = a.group_percentages();
    let groups_b = b.group_percentages();
    let attachment_a = archetype(&groups_a);
    let attachment_b = archetype(&groups_b);
    score_attachment(
        attachment_a,
        attachment_b,
        &groups_a,
        &groups_b,
        &mut scores,
        &mut rationale,
    );

    score_stages(&a, &b, &mut scores, &mut rationale);

    let shared_yongsin = a.yongsin.primary == b.yongsin.primary;
    if shared_yongsin {
        rationale.push(format!(
            "both favor {}: shared direction, not scored",
            a.yongsin.primary.name()
        ));
    }

    let mut combined: Vec<Branch> = Vec::with_capacity(6);
    for chart in [&a, &b] {
        for position in [Position::Year, Position::Month, Position::Day] {
            if let Some(branch) = chart.branch(position) {
                combined.push(branch);
            }
        }
    }
    let triple_punishment = contains_triple_punishment(&combined);
    if triple_punishment {
        scores.special += -3.0;
        rationale.push("triple punishment across the combined branches (-3)".to_string());
    }

    let total = (BASELINE + scores.sum()).clamp(0.0, 100.0).round() as u32;

    CompatibilityResult {
        scores,
        total,
        attachment_a,
        attachment_b,
        shared_yongsin,
        triple_punishment,
        rationale,
    }
}

/// Cross-chart triple combine over the month and day branches, then
/// per-position pair checks.
fn score_branches(
    a: &Person<'_>,
    b: &Person<'_>,
    scores: &mut CategoryScores,
    rationale: &mut Vec<String>,
    combine_found: &mut bool,
) {
    let core = [
        a.chart.month.branch(),
        a.chart.day.branch(),
        b.chart.month.branch(),
        b.chart.day.branch(),
    ];
    // Any three distinct members of the core set always span both charts.
    for skip in 0..4 {
        let picked: Vec<Branch> = core
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != skip)
            .map(|(_, &br)| br)
            .collect();
        if let Some(element) = branch_triple_combine(picked[0], picked[1], picked[2]) {
            *combine_found = true;
            scores.branch += 30.0;
            rationale.push(format!(
                "cross-chart triple combine into {} (+30)",
                element.name()
            ));
            yongsin_combine_bonus(a, b, element, scores, rationale);
            return;
        }
    }

    for position in SCORED_POSITIONS {
        let (Some(ba), Some(bb)) = (a.branch(position), b.branch(position)) else {
            continue;
        };
        if let Some(element) = branch_six_combine(ba, bb) {
            *combine_found = true;
            let bonus = branch_combine_bonus(position);
            scores.branch += bonus;
            rationale.push(format!(
                "{} branches {} and {} six-combine into {} (+{bonus})",
                position.name(),
                ba.name(),
                bb.name(),
                element.name()
            ));
            yongsin_combine_bonus(a, b, element, scores, rationale);
        } else if let Some(element) = branch_half_combine(ba, bb) {
            *combine_found = true;
            let bonus = branch_half_bonus(position);
            scores.branch += bonus;
            rationale.push(format!(
                "{} branches {} and {} half-combine toward {} (+{bonus})",
                position.name(),
                ba.name(),
                bb.name(),
                element.name()
            ));
            yongsin_combine_bonus(a, b, element, scores, rationale);
        }
        if branch_clash(ba, bb) {
            let penalty = branch_clash_penalty(position);
            scores.branch += penalty;
            rationale.push(format!(
                "{} branches {} and {} clash ({penalty})",
                position.name(),
                ba.name(),
                bb.name()
            ));
        }
    }
}

fn yongsin_combine_bonus(
    a: &Person<'_>,
    b: &Person<'_>,
    element: Element,
    scores: &mut CategoryScores,
    rationale: &mut Vec<String>,
) {
    if element == a.yongsin.primary || element == b.yongsin.primary {
        scores.branch += 10.0;
        rationale.push(format!(
            "the combine produces a favored element, {} (+10)",
            element.name()
        ));
    }
}

fn score_stems(
    a: &Person<'_>,
    b: &Person<'_>,
    scores: &mut CategoryScores,
    rationale: &mut Vec<String>,
    combine_found: &mut bool,
) {
    for position in SCORED_POSITIONS {
        let (Some(pa), Some(pb)) = (a.chart.pillar(position), b.chart.pillar(position)) else {
            continue;
        };
        if position == Position::Hour && !(a.has_hour && b.has_hour) {
            continue;
        }
        let (sa, sb) = (pa.stem(), pb.stem());
        let weight = stem_position_weight(position);
        if let Some(element) = stem_combine(sa, sb) {
            *combine_found = true;
            let bonus = (7.0 * weight).round();
            scores.stem += bonus;
            rationale.push(format!(
                "{} stems {} and {} combine into {} (+{bonus})",
                position.name(),
                sa.name(),
                sb.name(),
                element.name()
            ));
        }
        if stem_clash(sa, sb) {
            let penalty = (5.0 * weight).round();
            scores.stem -= penalty;
            rationale.push(format!(
                "{} stems {} and {} clash (-{penalty})",
                position.name(),
                sa.name(),
                sb.name()
            ));
        }
    }
}

/// Element cross-fill: one side's excess covering the other's deficiency.
fn score_elements(
    a: &Person<'_>,
    b: &Person<'_>,
    combine_found: bool,
    scores: &mut CategoryScores,
    rationale: &mut Vec<String>,
) {
    let pa = &a.weighing.elements.percentages;
    let pb = &b.weighing.elements.percentages;
    let mut a_covers = false;
    let mut b_covers = false;

    for i in 0..5 {
        let element = Element::from_index(i);
        if pa[i] >= ELEMENT_EXCESS && pb[i] <= ELEMENT_DEFICIENCY {
            a_covers = true;
            scores.element += 15.0;
            rationale.push(format!(
                "abundant {} on one side covers the other's shortage (+15)",
                element.name()
            ));
        }
        if pb[i] >= ELEMENT_EXCESS && pa[i] <= ELEMENT_DEFICIENCY {
            b_covers = true;
            scores.element += 15.0;
            rationale.push(format!(
                "abundant {} on one side covers the other's shortage (+15)",
                element.name()
            ));
        }
    }
    if a_covers && b_covers {
        scores.element += 5.0;
        rationale.push("the coverage runs both ways (+5)".to_string());
    }

    let shared_excess = (0..5).any(|i| pa[i] >= ELEMENT_EXCESS && pb[i] >= ELEMENT_EXCESS);
    if shared_excess && combine_found {
        scores.element += 10.0;
        rationale.push("a shared strong element is bound by a combine (+10)".to_string());
    }
}

fn score_attachment(
    attachment_a: Attachment,
    attachment_b: Attachment,
    groups_a: &[u32; 5],
    groups_b: &[u32; 5],
    scores: &mut CategoryScores,
    rationale: &mut Vec<String>,
) {
    let resource_a = groups_a[TenGodGroup::Resource.index()];
    let resource_b = groups_b[TenGodGroup::Resource.index()];

    if (attachment_a == Attachment::Secure && attachment_b.is_unstable())
        || (attachment_b == Attachment::Secure && attachment_a.is_unstable())
    {
        scores.ten_god_group += 10.0;
        rationale.push(format!(
            "a {} style steadies a {} one (+10)",
            Attachment::Secure.name(),
            if attachment_a.is_unstable() {
                attachment_a.name()
            } else {
                attachment_b.name()
            }
        ));
    } else if attachment_a == Attachment::Secure && attachment_b == Attachment::Secure {
        if resource_a >= GROUP_DOMINANCE && resource_b >= GROUP_DOMINANCE {
            scores.ten_god_group += 15.0;
            rationale.push("both secure and resource-anchored (+15)".to_string());
        } else {
            scores.ten_god_group += 8.0;
            rationale.push("both attachment styles are secure (+8)".to_string());
        }
    } else if attachment_a.is_unstable() && attachment_a == attachment_b {
        if dominant_group(groups_a) == dominant_group(groups_b) {
            scores.ten_god_group -= 15.0;
            rationale.push(format!(
                "both {} with the same dominant drive (-15)",
                attachment_a.name()
            ));
        } else {
            scores.ten_god_group -= 10.0;
            rationale.push(format!("both lean {} (-10)", attachment_a.name()));
        }
    }

    let da = dominant_group(groups_a);
    let db = dominant_group(groups_b);
    if (da == TenGodGroup::Output && db == TenGodGroup::Wealth)
        || (da == TenGodGroup::Wealth && db == TenGodGroup::Output)
    {
        scores.ten_god_group += 8.0;
        rationale.push("output meets wealth across the pair (+8)".to_string());
    }
}

fn score_stages(
    a: &Person<'_>,
    b: &Person<'_>,
    scores: &mut CategoryScores,
    rationale: &mut Vec<String>,
) {
    let day_clash = branch_clash(a.chart.day.branch(), b.chart.day.branch());
    let pairs = [
        ("month", a.chart.month.stage, b.chart.month.stage, false),
        ("day", a.chart.day.stage, b.chart.day.stage, day_clash),
    ];
    for (label, sa, sb, skip_same) in pairs {
        let (ba, bb) = (band(sa), band(sb));
        if ba == bb {
            // A clash between the day branches was already charged above.
            if !skip_same {
                scores.twelve_stage -= 3.0;
                rationale.push(format!("{label} stages sit in the same phase (-3)"));
            }
        } else if matches!(
            (ba, bb),
            (Band::Growth, Band::Decline) | (Band::Decline, Band::Growth)
        ) {
            scores.twelve_stage += 3.0;
            rationale.push(format!("{label} stages complement each other (+3)"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saju_chart::{BirthInput, build_chart};
    use saju_solar::TermEngine;

    fn chart(year: i32, month: u32, day: u32, time: Option<(u32, u32)>) -> Chart {
        build_chart(
            &TermEngine::new(),
            &BirthInput {
                year,
                month,
                day,
                time,
            },
        )
        .unwrap()
    }

    #[test]
    fn total_stays_in_bounds() {
        let dates = [
            (1990, 5, 15, Some((10, 30))),
            (1984, 2, 5, Some((0, 10))),
            (2001, 12, 31, None),
            (1955, 8, 8, Some((23, 45))),
            (1969, 1, 20, Some((6, 0))),
        ];
        for &(ya, ma, da, ta) in &dates {
            for &(yb, mb, db, tb) in &dates {
                let ca = chart(ya, ma, da, ta);
                let cb = chart(yb, mb, db, tb);
                let r = score_compatibility(&ca, ta.is_some(), &cb, tb.is_some());
                assert!(r.total <= 100);
                assert_eq!(
                    f64::from(r.total),
                    (BASELINE + r.scores.sum()).clamp(0.0, 100.0).round()
                );
            }
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let ca = chart(1990, 5, 15, Some((10, 30)));
        let cb = chart(1992, 8, 20, Some((4, 15)));
        let first = score_compatibility(&ca, true, &cb, true);
        let second = score_compatibility(&ca, true, &cb, true);
        assert_eq!(first, second);
    }

    #[test]
    fn day_clash_is_charged_once() {
        // 1990-05-15 day branch Jin; 1990-05-21 day index steps +6 to
        // Byeong-Sul, and Jin-Sul clash.
        let ca = chart(1990, 5, 15, None);
        let cb = chart(1990, 5, 21, None);
        assert!(branch_clash(ca.day.branch(), cb.day.branch()));
        let r = score_compatibility(&ca, false, &cb, false);
        assert!(
            r.rationale
                .iter()
                .any(|line| line.contains("day branches") && line.contains("clash"))
        );
        // The stage category must not also penalize the day pair.
        assert!(
            !r.rationale
                .iter()
                .any(|line| line.starts_with("day stages sit in the same phase"))
                || !branch_clash(ca.day.branch(), cb.day.branch())
        );
    }

    #[test]
    fn identical_charts_share_yongsin() {
        let ca = chart(1990, 5, 15, Some((10, 30)));
        let cb = chart(1990, 5, 15, Some((10, 30)));
        let r = score_compatibility(&ca, true, &cb, true);
        assert!(r.shared_yongsin);
        assert_eq!(r.attachment_a, r.attachment_b);
    }

    #[test]
    fn rationale_follows_category_order() {
        // Branch lines must come before stem lines, stems before element
        // lines, so a reader can follow the scoring pass top to bottom.
        let ca = chart(1984, 2, 5, Some((0, 10)));
        let cb = chart(1990, 5, 15, Some((10, 30)));
        let r = score_compatibility(&ca, true, &cb, true);
        let idx = |needle: &str| r.rationale.iter().position(|l| l.contains(needle));
        if let (Some(b), Some(s)) = (idx("branches"), idx("stems")) {
            assert!(b < s);
        }
    }

    #[test]
    fn archetype_rules() {
        // Authority-heavy with collapsed peers reads anxious.
        assert_eq!(archetype(&[2, 20, 25, 35, 18]), Attachment::Anxious);
        // Peer-heavy with collapsed authority reads avoidant.
        assert_eq!(archetype(&[30, 25, 22, 3, 20]), Attachment::Avoidant);
        // Balanced mid-range reads secure.
        assert_eq!(archetype(&[18, 19, 17, 18, 19]), Attachment::Secure);
        // Resource dominance reads secure even when others collapse.
        assert_eq!(archetype(&[10, 3, 10, 19, 30]), Attachment::Secure);
    }

    #[test]
    fn band_split_covers_all_stages() {
        use saju_base::ALL_STAGES;
        let growth = ALL_STAGES.iter().filter(|s| band(**s) == Band::Growth);
        let peak = ALL_STAGES.iter().filter(|s| band(**s) == Band::Peak);
        let decline = ALL_STAGES.iter().filter(|s| band(**s) == Band::Decline);
        assert_eq!(growth.count(), 3);
        assert_eq!(peak.count(), 3);
        assert_eq!(decline.count(), 6);
    }
}
