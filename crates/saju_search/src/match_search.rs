//! Exhaustive best/worst match search over a birth-year's pillar space.
//!
//! For a fixed target birth year there are only 60 day pillars and 12
//! month pillars, so the whole candidate space is 720 synthetic
//! three-pillar charts (hour unknown). The branch/stem pair
//! contributions against the reference chart are precomputed once per
//! reference as flat 60-entry lookup arrays; each candidate then costs
//! two table reads, a triple-combine probe, and one three-pillar run of
//! the element cascade for the cross-fill sub-score.

use saju_base::{
    Branch, CycleIndex, Element, Stem,
    relations::{
        branch_clash, branch_half_combine, branch_six_combine, branch_triple_combine,
        stem_clash, stem_combine,
    },
};
use saju_chart::{Chart, Position, WeighConfig, resolve_yongsin, weigh, weigh_positions};
use saju_solar::SolarTerm;
use saju_time::LocalDateTime;

use crate::compat::{
    BASELINE, ELEMENT_DEFICIENCY, ELEMENT_EXCESS, branch_clash_penalty, branch_combine_bonus,
    branch_half_bonus, stem_position_weight,
};

/// Number of score buckets (width 5 over 0..=100).
pub const SCORE_BUCKETS: usize = 21;

/// How many best and worst entries the search reports.
const TOP_COUNT: usize = 3;

/// One scored day/month pillar pairing of the target year.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub day_cycle: CycleIndex,
    pub month_cycle: CycleIndex,
    /// Month ordinal within the saju year (1 = tiger month).
    pub month_ordinal: u32,
    pub score: u32,
    /// A civil date in the target year carrying this day pillar, close
    /// to the middle of the candidate month.
    pub example_date: Option<LocalDateTime>,
}

/// Search telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchStats {
    pub candidates_scored: usize,
}

/// Full search output.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSearchResult {
    pub target_year: i32,
    pub year_cycle: CycleIndex,
    /// Up to three top candidates with distinct day and month pillars.
    pub best: Vec<Candidate>,
    /// Up to three bottom candidates with distinct day and month pillars.
    pub worst: Vec<Candidate>,
    /// Histogram of candidate scores in buckets of five points.
    pub distribution: [u32; SCORE_BUCKETS],
    /// Mean candidate score per day pillar, indexed by cycle value.
    pub per_day_pillar_average: [f64; 60],
    pub stats: MatchStats,
}

/// One precomputed pair contribution. `combine` feeds the shared-excess
/// rule of the element stage.
#[derive(Debug, Clone, Copy, Default)]
struct PairScore {
    score: f64,
    combine: bool,
}

fn branch_pair(position: Position, cand: Branch, reference: Branch, favored: Element) -> PairScore {
    let mut out = PairScore::default();
    if let Some(element) = branch_six_combine(cand, reference) {
        out.combine = true;
        out.score += branch_combine_bonus(position);
        if element == favored {
            out.score += 10.0;
        }
    } else if let Some(element) = branch_half_combine(cand, reference) {
        out.combine = true;
        out.score += branch_half_bonus(position);
        if element == favored {
            out.score += 10.0;
        }
    }
    if branch_clash(cand, reference) {
        out.score += branch_clash_penalty(position);
    }
    out
}

fn stem_pair(position: Position, cand: Stem, reference: Stem) -> PairScore {
    let mut out = PairScore::default();
    let weight = stem_position_weight(position);
    if stem_combine(cand, reference).is_some() {
        out.combine = true;
        out.score += (7.0 * weight).round();
    }
    if stem_clash(cand, reference) {
        out.score -= (5.0 * weight).round();
    }
    out
}

/// Per-reference lookup tables over the full 60-cycle, built once and
/// read for every candidate.
struct Reference {
    day_branch: Branch,
    month_branch: Branch,
    percentages: [u32; 5],
    favored: Element,
    /// Candidate day pillar vs the reference day position.
    day_table: [PairScore; 60],
    /// Candidate year pillar vs the reference year position.
    year_table: [PairScore; 60],
    /// Reference day/month/year stems, for the stem-only path.
    ref_stems: [Stem; 3],
}

impl Reference {
    fn new(chart: &Chart, has_hour: bool, config: &WeighConfig) -> Self {
        let weighing = weigh(chart, has_hour, config);
        let favored = resolve_yongsin(&weighing.elements).primary;

        let mut day_table = [PairScore::default(); 60];
        let mut year_table = [PairScore::default(); 60];
        for idx in 0..60u8 {
            let cycle = CycleIndex::new(idx as i64);
            let mut day = branch_pair(Position::Day, cycle.branch(), chart.day.branch(), favored);
            let day_stems = stem_pair(Position::Day, cycle.stem(), chart.day.stem());
            day.score += day_stems.score;
            day.combine |= day_stems.combine;
            day_table[idx as usize] = day;

            let mut year =
                branch_pair(Position::Year, cycle.branch(), chart.year.branch(), favored);
            let year_stems = stem_pair(Position::Year, cycle.stem(), chart.year.stem());
            year.score += year_stems.score;
            year.combine |= year_stems.combine;
            year_table[idx as usize] = year;
        }

        Self {
            day_branch: chart.day.branch(),
            month_branch: chart.month.branch(),
            percentages: weighing.elements.percentages,
            favored,
            day_table,
            year_table,
            ref_stems: [chart.day.stem(), chart.month.stem(), chart.year.stem()],
        }
    }

    /// Stem-stage contribution alone, for candidates whose branch stage
    /// is replaced by a cross triple combine.
    fn stem_only(&self, position: Position, cand: Stem) -> PairScore {
        let reference = match position {
            Position::Day => self.ref_stems[0],
            Position::Month => self.ref_stems[1],
            _ => self.ref_stems[2],
        };
        stem_pair(position, cand, reference)
    }
}

/// Score every day/month pillar pairing of `target_year` against the
/// reference chart.
pub fn find_best_and_worst(
    reference: &Chart,
    has_hour: bool,
    target_year: i32,
) -> MatchSearchResult {
    let config = WeighConfig::default();
    let reference = Reference::new(reference, has_hour, &config);

    let year_cycle = CycleIndex::for_year(target_year);
    let year_stem = year_cycle.stem();
    let year_entry = reference.year_table[year_cycle.value() as usize];

    // Month contribution per ordinal: the year fixes all 12 month pillars.
    let mut month_cycles: [Option<CycleIndex>; 12] = [None; 12];
    let mut month_table = [PairScore::default(); 12];
    for ordinal in 1..=12u32 {
        let Some(month_cycle) = CycleIndex::for_month(year_stem, ordinal) else {
            continue;
        };
        month_cycles[(ordinal - 1) as usize] = Some(month_cycle);
        let mut entry = branch_pair(
            Position::Month,
            month_cycle.branch(),
            reference.month_branch,
            reference.favored,
        );
        let stems = reference.stem_only(Position::Month, month_cycle.stem());
        entry.score += stems.score;
        entry.combine |= stems.combine;
        month_table[(ordinal - 1) as usize] = entry;
    }

    // (day index, ordinal, score) for every candidate.
    let mut scored: Vec<(u8, u32, u32)> = Vec::with_capacity(60 * 12);
    let mut distribution = [0u32; SCORE_BUCKETS];
    let mut day_sums = [0f64; 60];

    for ordinal in 1..=12u32 {
        let Some(month_cycle) = month_cycles[(ordinal - 1) as usize] else {
            continue;
        };
        let month_entry = month_table[(ordinal - 1) as usize];
        for day_index in 0..60u8 {
            let day_cycle = CycleIndex::new(day_index as i64);
            let score = score_candidate(
                &reference,
                day_cycle,
                month_cycle,
                year_cycle,
                month_entry,
                year_entry,
                &config,
            );
            distribution[(score / 5).min(20) as usize] += 1;
            day_sums[day_index as usize] += f64::from(score);
            scored.push((day_index, ordinal, score));
        }
    }

    let stats = MatchStats {
        candidates_scored: scored.len(),
    };

    let mut per_day_pillar_average = [0f64; 60];
    for (i, sum) in day_sums.iter().enumerate() {
        per_day_pillar_average[i] = sum / 12.0;
    }

    // Best: highest score first; ties resolve toward the lower day index
    // and earlier month so the output is stable.
    let mut by_best = scored.clone();
    by_best.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)).then(a.1.cmp(&b.1)));
    let best = pick_diverse(&by_best, &month_cycles, target_year);

    let mut by_worst = scored;
    by_worst.sort_by(|a, b| a.2.cmp(&b.2).then(a.0.cmp(&b.0)).then(a.1.cmp(&b.1)));
    let worst = pick_diverse(&by_worst, &month_cycles, target_year);

    MatchSearchResult {
        target_year,
        year_cycle,
        best,
        worst,
        distribution,
        per_day_pillar_average,
        stats,
    }
}

#[allow(clippy::too_many_arguments)]
fn score_candidate(
    reference: &Reference,
    day_cycle: CycleIndex,
    month_cycle: CycleIndex,
    year_cycle: CycleIndex,
    month_entry: PairScore,
    year_entry: PairScore,
    config: &WeighConfig,
) -> u32 {
    let mut raw = 0.0;
    let mut combine_found = false;

    // Cross triple combine over both sides' month and day branches. When
    // one is present it replaces the per-position branch stage.
    let core = [
        month_cycle.branch(),
        day_cycle.branch(),
        reference.month_branch,
        reference.day_branch,
    ];
    let mut triple = None;
    for skip in 0..4 {
        let picked: Vec<Branch> = core
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != skip)
            .map(|(_, &br)| br)
            .collect();
        if let Some(element) = branch_triple_combine(picked[0], picked[1], picked[2]) {
            triple = Some(element);
            break;
        }
    }

    if let Some(element) = triple {
        combine_found = true;
        raw += 30.0;
        if element == reference.favored {
            raw += 10.0;
        }
        // Stems still score pairwise.
        for (position, stem) in [
            (Position::Day, day_cycle.stem()),
            (Position::Month, month_cycle.stem()),
            (Position::Year, year_cycle.stem()),
        ] {
            let entry = reference.stem_only(position, stem);
            raw += entry.score;
            combine_found |= entry.combine;
        }
    } else {
        let day_entry = reference.day_table[day_cycle.value() as usize];
        raw += day_entry.score + month_entry.score + year_entry.score;
        combine_found = day_entry.combine || month_entry.combine || year_entry.combine;
    }

    // Element cross-fill against a candidate-specific weighing: the same
    // cascade as the full analysis, specialized to three pillars.
    let candidate_weighing = weigh_positions(
        day_cycle.stem(),
        &[
            (Position::Day, day_cycle.stem(), day_cycle.branch()),
            (Position::Month, month_cycle.stem(), month_cycle.branch()),
            (Position::Year, year_cycle.stem(), year_cycle.branch()),
        ],
        config,
    );
    raw += cross_fill_score(
        &reference.percentages,
        &candidate_weighing.elements.percentages,
        combine_found,
    );

    (BASELINE + raw).clamp(0.0, 100.0).round() as u32
}

/// The element stage of pair scoring, without rationale strings.
fn cross_fill_score(pa: &[u32; 5], pb: &[u32; 5], combine_found: bool) -> f64 {
    let mut score = 0.0;
    let mut a_covers = false;
    let mut b_covers = false;
    for i in 0..5 {
        if pa[i] >= ELEMENT_EXCESS && pb[i] <= ELEMENT_DEFICIENCY {
            a_covers = true;
            score += 15.0;
        }
        if pb[i] >= ELEMENT_EXCESS && pa[i] <= ELEMENT_DEFICIENCY {
            b_covers = true;
            score += 15.0;
        }
    }
    if a_covers && b_covers {
        score += 5.0;
    }
    if combine_found && (0..5).any(|i| pa[i] >= ELEMENT_EXCESS && pb[i] >= ELEMENT_EXCESS) {
        score += 10.0;
    }
    score
}

/// Take the first entries whose day pillars and month pillars are all
/// pairwise distinct, up to [`TOP_COUNT`].
fn pick_diverse(
    sorted: &[(u8, u32, u32)],
    month_cycles: &[Option<CycleIndex>; 12],
    target_year: i32,
) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::with_capacity(TOP_COUNT);
    let mut day_seen: Vec<u8> = Vec::with_capacity(TOP_COUNT);
    let mut month_seen: Vec<u32> = Vec::with_capacity(TOP_COUNT);

    for &(day_index, ordinal, score) in sorted {
        if out.len() == TOP_COUNT {
            break;
        }
        if day_seen.contains(&day_index) || month_seen.contains(&ordinal) {
            continue;
        }
        let Some(month_cycle) = month_cycles[(ordinal - 1) as usize] else {
            continue;
        };
        let day_cycle = CycleIndex::new(day_index as i64);
        out.push(Candidate {
            day_cycle,
            month_cycle,
            month_ordinal: ordinal,
            score,
            example_date: example_date(target_year, ordinal, day_cycle),
        });
        day_seen.push(day_index);
        month_seen.push(ordinal);
    }
    out
}

/// A civil date near the middle of the candidate month whose day pillar
/// matches. The 60-day cycle guarantees a hit within a +-30 day scan.
fn example_date(target_year: i32, ordinal: u32, day_cycle: CycleIndex) -> Option<LocalDateTime> {
    let term = SolarTerm::from_month_ordinal(ordinal)?;
    let (year_offset, month, day) = term.approx_civil_date();
    let seed = LocalDateTime::new(target_year + year_offset, month, day, 12, 0, 0.0)
        .offset_days(10);
    for delta in -30i64..30 {
        let date = seed.offset_days(delta);
        if CycleIndex::for_day(date.year, date.month, date.day) == day_cycle {
            return Some(LocalDateTime::new(date.year, date.month, date.day, 0, 0, 0.0));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use saju_chart::{BirthInput, build_chart};
    use saju_solar::TermEngine;

    fn reference() -> Chart {
        build_chart(
            &TermEngine::new(),
            &BirthInput {
                year: 1990,
                month: 5,
                day: 15,
                time: Some((10, 30)),
            },
        )
        .unwrap()
    }

    #[test]
    fn covers_the_whole_candidate_space() {
        let result = find_best_and_worst(&reference(), true, 1995);
        assert_eq!(result.stats.candidates_scored, 720);
        let histogram_total: u32 = result.distribution.iter().sum();
        assert_eq!(histogram_total, 720);
    }

    #[test]
    fn best_and_worst_are_diverse() {
        let result = find_best_and_worst(&reference(), true, 1995);
        for group in [&result.best, &result.worst] {
            assert!(!group.is_empty());
            assert!(group.len() <= 3);
            for i in 0..group.len() {
                for j in (i + 1)..group.len() {
                    assert_ne!(group[i].day_cycle, group[j].day_cycle);
                    assert_ne!(group[i].month_cycle, group[j].month_cycle);
                }
            }
        }
    }

    #[test]
    fn best_scores_dominate_worst() {
        let result = find_best_and_worst(&reference(), true, 1995);
        let best = result.best[0].score;
        let worst = result.worst[0].score;
        assert!(best >= worst);
        assert!(result.best.iter().all(|c| c.score >= worst));
    }

    #[test]
    fn example_dates_carry_the_day_pillar() {
        let result = find_best_and_worst(&reference(), true, 1995);
        for candidate in result.best.iter().chain(result.worst.iter()) {
            let date = candidate.example_date.as_ref().unwrap();
            assert_eq!(
                CycleIndex::for_day(date.year, date.month, date.day),
                candidate.day_cycle
            );
        }
    }

    #[test]
    fn per_day_average_is_bounded() {
        let result = find_best_and_worst(&reference(), true, 1995);
        assert!(
            result
                .per_day_pillar_average
                .iter()
                .all(|&avg| (0.0..=100.0).contains(&avg))
        );
    }

    #[test]
    fn tables_agree_with_direct_pair_scoring() {
        let chart = reference();
        let config = WeighConfig::default();
        let tables = Reference::new(&chart, true, &config);
        for idx in [0u8, 17, 40, 59] {
            let cycle = CycleIndex::new(idx as i64);
            let mut direct =
                branch_pair(Position::Day, cycle.branch(), chart.day.branch(), tables.favored);
            let stems = stem_pair(Position::Day, cycle.stem(), chart.day.stem());
            direct.score += stems.score;
            assert_eq!(tables.day_table[idx as usize].score, direct.score);
        }
    }

    #[test]
    fn search_is_deterministic() {
        let chart = reference();
        let first = find_best_and_worst(&chart, true, 2002);
        let second = find_best_and_worst(&chart, true, 2002);
        assert_eq!(first, second);
    }
}
