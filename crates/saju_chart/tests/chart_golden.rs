//! Golden-value integration tests for chart construction: known pillar
//! sets, boundary behavior at Ipchun, and annotation self-consistency.

use saju_base::{Branch, CycleIndex, Stem, ten_god, twelve_stage};
use saju_chart::{BirthInput, WeighConfig, build_chart, resolve_yongsin, weigh};
use saju_solar::{SolarTerm, TermEngine};
use saju_time::LocalDateTime;

fn input(year: i32, month: u32, day: u32, time: Option<(u32, u32)>) -> BirthInput {
    BirthInput {
        year,
        month,
        day,
        time,
    }
}

#[test]
fn chart_annotations_are_self_consistent() {
    let engine = TermEngine::new();
    let chart = build_chart(&engine, &input(1990, 5, 15, Some((10, 30)))).unwrap();
    let day_stem = chart.day_stem();

    for (_, pillar) in chart.active_pillars(true) {
        assert_eq!(pillar.stem_ten_god, ten_god(day_stem, pillar.stem()));
        assert_eq!(
            pillar.branch_ten_god,
            ten_god(day_stem, pillar.branch().main_hidden_stem())
        );
        assert_eq!(pillar.stage, twelve_stage(day_stem, pillar.branch()));
        for h in &pillar.hidden {
            assert_eq!(h.ten_god, ten_god(day_stem, h.stem));
        }
        // Every derived pair must exist in the 60-cycle.
        assert!(CycleIndex::from_stem_branch(pillar.stem(), pillar.branch()).is_some());
    }
}

#[test]
fn ipchun_boundary_splits_saju_years() {
    let engine = TermEngine::new();
    let ipchun = engine.find_term_instant(2000, SolarTerm::Ipchun).unwrap();

    // One minute before the boundary: prior saju year.
    let before_minutes = ipchun.hour * 60 + ipchun.minute;
    let (bh, bm) = ((before_minutes - 1) / 60, (before_minutes - 1) % 60);
    let before = build_chart(
        &engine,
        &input(ipchun.year, ipchun.month, ipchun.day, Some((bh, bm))),
    )
    .unwrap();
    assert_eq!(before.terms.saju_year, 1999);

    // One minute after: current saju year.
    let (ah, am) = ((before_minutes + 1) / 60, (before_minutes + 1) % 60);
    let after = build_chart(
        &engine,
        &input(ipchun.year, ipchun.month, ipchun.day, Some((ah, am))),
    )
    .unwrap();
    assert_eq!(after.terms.saju_year, 2000);
    assert_eq!(
        after.year.cycle.value(),
        (before.year.cycle.value() + 1) % 60
    );
}

#[test]
fn day_cycle_steps_across_consecutive_days() {
    let engine = TermEngine::new();
    // Same mid-day time on consecutive dates, away from the rollover edge.
    let a = build_chart(&engine, &input(2015, 9, 9, Some((14, 0)))).unwrap();
    let b = build_chart(&engine, &input(2015, 9, 10, Some((14, 0)))).unwrap();
    assert_eq!(b.day.cycle.value(), (a.day.cycle.value() + 1) % 60);
}

#[test]
fn month_context_brackets_the_birth() {
    let engine = TermEngine::new();
    let chart = build_chart(&engine, &input(1990, 5, 15, Some((10, 30)))).unwrap();
    let birth_jd = LocalDateTime::new(1990, 5, 15, 10, 30, 0.0).to_jd();
    assert!(chart.terms.current.jd_local <= birth_jd);
    assert!(birth_jd < chart.terms.next.jd_local);
    assert_eq!(chart.terms.current.term, SolarTerm::Ipha);
    assert_eq!(chart.terms.next.term, SolarTerm::Mangjong);
}

#[test]
fn known_pillars_1984_02_05() {
    // 1984-02-05 (after Ipchun 1984): Gap-Ja year.
    let engine = TermEngine::new();
    let chart = build_chart(&engine, &input(1984, 2, 5, Some((12, 0)))).unwrap();
    assert_eq!(
        (chart.year.stem(), chart.year.branch()),
        (Stem::Gap, Branch::Ja)
    );
    assert_eq!(chart.terms.month_ordinal, 1);
    assert_eq!(
        (chart.month.stem(), chart.month.branch()),
        (Stem::Byeong, Branch::In)
    );
}

#[test]
fn full_pipeline_produces_closed_percentages() {
    let engine = TermEngine::new();
    let cfg = WeighConfig::default();
    for (y, m, d) in [(1962, 3, 1), (1988, 10, 17), (2003, 7, 30)] {
        let chart = build_chart(&engine, &input(y, m, d, Some((8, 20)))).unwrap();
        let weighing = weigh(&chart, true, &cfg);
        let sum: u32 = weighing.elements.percentages.iter().sum();
        assert_eq!(sum, 100);
        let yongsin = resolve_yongsin(&weighing.elements);
        assert!(!yongsin.rationale.is_empty());
    }
}
