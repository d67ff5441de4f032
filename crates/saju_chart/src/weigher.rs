//! Weighted five-element distribution and ten-god histogram.
//!
//! Implements the cascading transformation pass: every stem/branch slot
//! starts from a position base weight, adjacent-pair combine/clash
//! matches emit transformation events, and a separate aggregation fold
//! turns the event list into final element and ten-god weights. Combine
//! events both discount the slot's own element (offset factor) and add
//! the converted element at the event fraction; clash events discount
//! only.

use saju_base::{
    Branch, Element, Stem, ten_god,
    relations::{branch_clash, branch_half_combine, branch_six_combine, stem_clash, stem_combine},
};

use crate::chart::{Chart, Pillar, Position};

/// Per-position base weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionWeights {
    pub year: f64,
    pub month: f64,
    pub day: f64,
    pub hour: f64,
}

impl PositionWeights {
    pub const fn get(&self, position: Position) -> f64 {
        match position {
            Position::Year => self.year,
            Position::Month => self.month,
            Position::Day => self.day,
            Position::Hour => self.hour,
        }
    }
}

/// Tunable weigher constants. The defaults are empirically chosen domain
/// parameters, not structural requirements; keep them here rather than
/// inlined at use sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeighConfig {
    pub stem_weights: PositionWeights,
    pub branch_weights: PositionWeights,
    /// Stem five-combine transform fraction.
    pub stem_combine_fraction: f64,
    /// Stem clash discount fraction.
    pub stem_clash_fraction: f64,
    /// Branch six-combine transform fraction.
    pub branch_combine_fraction: f64,
    /// Branch clash discount fraction.
    pub branch_clash_fraction: f64,
    /// Half-combine fraction for the day-month pair.
    pub half_combine_fraction: f64,
    /// Half-combine fraction on the wangji side of a month-year or
    /// day-hour pair.
    pub half_dominant_fraction: f64,
    /// Half-combine fraction on the non-wangji side of those pairs.
    pub half_pulled_fraction: f64,
    /// Half-combine fraction per side when the pair carries no single
    /// wangji (unreachable from the fixed table; kept for completeness).
    pub half_even_fraction: f64,
    /// Structural resistance multiplier for the day and month positions.
    pub resistance_factor: f64,
}

impl Default for WeighConfig {
    fn default() -> Self {
        Self {
            // Month command (wolryeong) dominates; the day branch sits
            // above the outer positions.
            stem_weights: PositionWeights {
                year: 1.0,
                month: 1.2,
                day: 1.0,
                hour: 1.0,
            },
            branch_weights: PositionWeights {
                year: 1.0,
                month: 2.4,
                day: 1.2,
                hour: 1.0,
            },
            stem_combine_fraction: 1.0 / 3.0,
            stem_clash_fraction: 1.0 / 3.0,
            branch_combine_fraction: 2.0 / 3.0,
            branch_clash_fraction: 1.0 / 3.0,
            half_combine_fraction: 2.0 / 3.0,
            half_dominant_fraction: 1.0 / 6.0,
            half_pulled_fraction: 2.0 / 3.0,
            half_even_fraction: 1.0 / 3.0,
            resistance_factor: 0.5,
        }
    }
}

/// Weighted five-element distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDistribution {
    /// Raw weights indexed by [`Element::index`].
    pub weights: [f64; 5],
    /// Percentages by largest-remainder allocation; sum to exactly 100
    /// whenever any weight is positive.
    pub percentages: [u32; 5],
}

impl ElementDistribution {
    fn from_weights(weights: [f64; 5]) -> Self {
        let total: f64 = weights.iter().sum();
        let mut percentages = [0u32; 5];
        if total > 0.0 {
            // Largest-remainder allocation: floor every share, then hand
            // the leftover points to the largest fractional parts so the
            // percentages always sum to exactly 100.
            let shares: Vec<f64> = weights.iter().map(|w| w / total * 100.0).collect();
            let mut allocated = 0u32;
            for (i, share) in shares.iter().enumerate() {
                percentages[i] = share.floor() as u32;
                allocated += percentages[i];
            }
            let mut order: Vec<usize> = (0..5).collect();
            order.sort_by(|&a, &b| {
                (shares[b] - shares[b].floor())
                    .partial_cmp(&(shares[a] - shares[a].floor()))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.cmp(&b))
            });
            for &i in order.iter().take((100 - allocated.min(100)) as usize) {
                percentages[i] += 1;
            }
        }
        Self {
            weights,
            percentages,
        }
    }

    pub fn weight(&self, element: Element) -> f64 {
        self.weights[element.index()]
    }

    pub fn percentage(&self, element: Element) -> u32 {
        self.percentages[element.index()]
    }
}

/// Ten-god weight histogram, co-produced with the element distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct TenGodCount {
    /// Raw weights indexed by [`saju_base::TenGod::index`].
    pub weights: [f64; 10],
}

/// Combined weigher output.
#[derive(Debug, Clone, PartialEq)]
pub struct Weighing {
    pub elements: ElementDistribution,
    pub ten_gods: TenGodCount,
}

/// One transformation event against a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TransformEvent {
    /// Converted element; `None` for pure clash discounts.
    element: Option<Element>,
    fraction: f64,
}

/// One stem or branch slot of the cascade.
#[derive(Debug, Clone)]
struct Slot {
    position: Position,
    stem: Option<Stem>,
    branch: Option<Branch>,
    base: f64,
    events: Vec<TransformEvent>,
}

impl Slot {
    fn offset_factor(&self) -> f64 {
        self.events.iter().fold(1.0, |acc, e| acc * (1.0 - e.fraction))
    }
}

/// Resistance multiplier for `position` being altered by `other`: the day
/// resists its hour and month neighbors, the month resists the year.
fn resistance(config: &WeighConfig, position: Position, other: Position) -> f64 {
    match (position, other) {
        (Position::Day, Position::Hour)
        | (Position::Day, Position::Month)
        | (Position::Month, Position::Day)
        | (Position::Month, Position::Year) => config.resistance_factor,
        _ => 1.0,
    }
}

fn is_outer_pair(a: Position, b: Position) -> bool {
    matches!(
        (a, b),
        (Position::Month, Position::Year)
            | (Position::Year, Position::Month)
            | (Position::Hour, Position::Day)
            | (Position::Day, Position::Hour)
    )
}

/// Half-combine fraction for one side of a pair, honoring the wangji
/// split on the outer pairs.
fn half_fraction(config: &WeighConfig, pair: (Position, Position), own: Branch, other: Branch) -> f64 {
    if !is_outer_pair(pair.0, pair.1) {
        return config.half_combine_fraction;
    }
    match (own.is_dominant(), other.is_dominant()) {
        (true, false) => config.half_dominant_fraction,
        (false, true) => config.half_pulled_fraction,
        _ => config.half_even_fraction,
    }
}

/// Run the cascade over a chart's active positions.
pub fn weigh(chart: &Chart, has_hour: bool, config: &WeighConfig) -> Weighing {
    let day_stem = chart.day_stem();
    let positions: Vec<(Position, Stem, Branch)> = chart
        .active_pillars(has_hour)
        .into_iter()
        .map(|(position, pillar): (Position, &Pillar)| (position, pillar.stem(), pillar.branch()))
        .collect();
    weigh_positions(day_stem, &positions, config)
}

/// Run the cascade over raw `(position, stem, branch)` triples, ordered
/// hour -> day -> month -> year. This is the entry point the match search
/// uses for synthetic three-pillar candidates.
pub fn weigh_positions(
    day_stem: Stem,
    active: &[(Position, Stem, Branch)],
    config: &WeighConfig,
) -> Weighing {
    // One stem slot and one branch slot per active position.
    let mut slots: Vec<Slot> = Vec::with_capacity(active.len() * 2);
    for &(position, stem, branch) in active {
        slots.push(Slot {
            position,
            stem: Some(stem),
            branch: None,
            base: config.stem_weights.get(position),
            events: Vec::new(),
        });
        slots.push(Slot {
            position,
            stem: None,
            branch: Some(branch),
            base: config.branch_weights.get(position),
            events: Vec::new(),
        });
    }

    // Scan adjacent position pairs and emit events.
    for pair in active.windows(2) {
        let (pos_a, stem_a, branch_a) = pair[0];
        let (pos_b, stem_b, branch_b) = pair[1];

        // Stems.
        if let Some(element) = stem_combine(stem_a, stem_b) {
            push_event(&mut slots, pos_a, true, Some(element),
                config.stem_combine_fraction * resistance(config, pos_a, pos_b));
            push_event(&mut slots, pos_b, true, Some(element),
                config.stem_combine_fraction * resistance(config, pos_b, pos_a));
        }
        if stem_clash(stem_a, stem_b) {
            push_event(&mut slots, pos_a, true, None,
                config.stem_clash_fraction * resistance(config, pos_a, pos_b));
            push_event(&mut slots, pos_b, true, None,
                config.stem_clash_fraction * resistance(config, pos_b, pos_a));
        }

        // Branches.
        let (ba, bb) = (branch_a, branch_b);
        if let Some(element) = branch_six_combine(ba, bb) {
            push_event(&mut slots, pos_a, false, Some(element),
                config.branch_combine_fraction * resistance(config, pos_a, pos_b));
            push_event(&mut slots, pos_b, false, Some(element),
                config.branch_combine_fraction * resistance(config, pos_b, pos_a));
        }
        if branch_clash(ba, bb) {
            push_event(&mut slots, pos_a, false, None,
                config.branch_clash_fraction * resistance(config, pos_a, pos_b));
            push_event(&mut slots, pos_b, false, None,
                config.branch_clash_fraction * resistance(config, pos_b, pos_a));
        }
        if let Some(element) = branch_half_combine(ba, bb) {
            push_event(&mut slots, pos_a, false, Some(element),
                half_fraction(config, (pos_a, pos_b), ba, bb) * resistance(config, pos_a, pos_b));
            push_event(&mut slots, pos_b, false, Some(element),
                half_fraction(config, (pos_b, pos_a), bb, ba) * resistance(config, pos_b, pos_a));
        }
    }

    // Aggregation fold: discount own element, add converted elements.
    let mut element_weights = [0.0f64; 5];
    let mut ten_god_weights = [0.0f64; 10];

    let mut add = |element: Element, via_stem: Option<Stem>, weight: f64| {
        if weight <= 0.0 {
            return;
        }
        element_weights[element.index()] += weight;
        let stem = via_stem.unwrap_or_else(|| element.yang_stem());
        ten_god_weights[ten_god(day_stem, stem).index()] += weight;
    };

    for slot in &slots {
        let retained = slot.base * slot.offset_factor();
        match (slot.stem, slot.branch) {
            (Some(stem), _) => add(stem.element(), Some(stem), retained),
            (_, Some(branch)) => {
                for h in branch.hidden_stems() {
                    add(h.stem.element(), Some(h.stem), retained * h.fraction());
                }
            }
            _ => {}
        }
        for event in &slot.events {
            if let Some(element) = event.element {
                add(element, None, slot.base * event.fraction);
            }
        }
    }

    Weighing {
        elements: ElementDistribution::from_weights(element_weights),
        ten_gods: TenGodCount {
            weights: ten_god_weights,
        },
    }
}

fn push_event(
    slots: &mut [Slot],
    position: Position,
    is_stem: bool,
    element: Option<Element>,
    fraction: f64,
) {
    for slot in slots.iter_mut() {
        if slot.position == position && slot.stem.is_some() == is_stem {
            slot.events.push(TransformEvent { element, fraction });
            return;
        }
    }
}
