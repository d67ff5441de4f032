//! Favorable-element (yongsin) resolution from a weighted distribution.
//!
//! Rule order: suppress an excess element, reinforce a deficient one via
//! the two-hop suppress-the-suppressor rule, or fall back to the weakest
//! element. A mediator (tonggwan) element is added when the two leading
//! elements stand in an overcoming relation.

use saju_base::{ALL_ELEMENTS, Element};

use crate::weigher::ElementDistribution;

/// Percentage at or above which an element counts as excessive.
pub const EXCESS_THRESHOLD: u32 = 40;
/// Percentage at or below which an element counts as deficient.
pub const DEFICIENCY_THRESHOLD: u32 = 13;
/// Both leading elements must reach this share for the mediator rule.
pub const MEDIATOR_THRESHOLD: u32 = 20;

/// Favorable-element recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct YongsinResult {
    pub primary: Element,
    pub mediator: Option<Element>,
    pub rationale: Vec<String>,
}

/// Reinforce `deficient` by suppressing its suppressor.
fn two_hop_support(deficient: Element) -> Element {
    deficient.overcome_by().overcome_by()
}

/// Resolve the favorable element for a distribution.
pub fn resolve_yongsin(distribution: &ElementDistribution) -> YongsinResult {
    let mut rationale = Vec::new();

    let mut ranked: Vec<Element> = ALL_ELEMENTS.to_vec();
    ranked.sort_by(|a, b| {
        distribution
            .percentage(*b)
            .cmp(&distribution.percentage(*a))
            .then(a.index().cmp(&b.index()))
    });
    let strongest = ranked[0];
    let weakest = ranked[4];

    let primary = if distribution.percentage(strongest) >= EXCESS_THRESHOLD {
        let favorable = strongest.overcome_by();
        rationale.push(format!(
            "{} is excessive at {}%; favor {}, which overcomes it",
            strongest.name(),
            distribution.percentage(strongest),
            favorable.name()
        ));
        favorable
    } else if distribution.percentage(weakest) <= DEFICIENCY_THRESHOLD {
        let favorable = two_hop_support(weakest);
        rationale.push(format!(
            "{} is deficient at {}%; favor {}, which suppresses its suppressor {}",
            weakest.name(),
            distribution.percentage(weakest),
            favorable.name(),
            weakest.overcome_by().name()
        ));
        favorable
    } else {
        let favorable = two_hop_support(weakest);
        rationale.push(format!(
            "no excess or deficiency; favor {} to support the weakest element {}",
            favorable.name(),
            weakest.name()
        ));
        favorable
    };

    // Mediator: two strong elements locked in an overcoming relation.
    let (first, second) = (ranked[0], ranked[1]);
    let mediator = if distribution.percentage(first) >= MEDIATOR_THRESHOLD
        && distribution.percentage(second) >= MEDIATOR_THRESHOLD
    {
        let overcomer = if first.overcomes() == second {
            Some(first)
        } else if second.overcomes() == first {
            Some(second)
        } else {
            None
        };
        overcomer.map(|o| {
            let m = o.generates();
            rationale.push(format!(
                "{} and {} are both strong and opposed; {} mediates between them",
                first.name(),
                second.name(),
                m.name()
            ));
            m
        })
    } else {
        None
    };

    YongsinResult {
        primary,
        mediator,
        rationale,
    }
}
