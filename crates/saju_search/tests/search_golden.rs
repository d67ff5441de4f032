//! End-to-end timeline, compatibility, and search checks against known
//! reference dates.

use saju_base::{Branch, Stem};
use saju_chart::{BirthInput, Chart, build_chart};
use saju_search::{
    Gender, daeun, detect_relations, find_best_and_worst, score_compatibility, wolun,
};
use saju_solar::TermEngine;
use saju_time::LocalDateTime;

fn chart(engine: &TermEngine, year: i32, month: u32, day: u32, time: Option<(u32, u32)>) -> Chart {
    build_chart(
        engine,
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
fn reference_birth_full_reading() {
    let engine = TermEngine::new();
    // 1990-05-15 10:30 is the Gyeong-O / Sin-Sa / Gyeong-Jin / Sin-Sa chart.
    let c = chart(&engine, 1990, 5, 15, Some((10, 30)));
    assert_eq!(c.year.stem(), Stem::Gyeong);
    assert_eq!(c.day.branch(), Branch::Jin);

    // Yang year stem: the male timeline runs forward from Sin-Sa.
    let male = daeun(&c, Gender::Male);
    let female = daeun(&c, Gender::Female);
    assert!(male.forward);
    assert!(!female.forward);
    assert_eq!(male.periods[0].cycle, c.month.cycle.offset(1));
    assert_eq!(female.periods[0].cycle, c.month.cycle.offset(-1));
    // Forward and backward start ages split the month around the birth.
    assert!(male.start_age + female.start_age <= 11);

    let relations = detect_relations(&c, true);
    assert!(!relations.is_empty());
}

#[test]
fn compatibility_is_symmetric_in_total() {
    let engine = TermEngine::new();
    let pairs = [
        ((1990, 5, 15, Some((10, 30))), (1992, 8, 20, Some((4, 15)))),
        ((1984, 2, 5, Some((0, 10))), (1955, 8, 8, None)),
        ((2001, 12, 31, None), (1969, 1, 20, Some((6, 0)))),
    ];
    for ((ya, ma, da, ta), (yb, mb, db, tb)) in pairs {
        let a = chart(&engine, ya, ma, da, ta);
        let b = chart(&engine, yb, mb, db, tb);
        let ab = score_compatibility(&a, ta.is_some(), &b, tb.is_some());
        let ba = score_compatibility(&b, tb.is_some(), &a, ta.is_some());
        assert_eq!(ab.total, ba.total);
        assert_eq!(ab.scores.sum(), ba.scores.sum());
    }
}

#[test]
fn wolun_follows_the_term_calendar() {
    let engine = TermEngine::new();
    let c = chart(&engine, 1990, 5, 15, Some((10, 30)));
    let now = LocalDateTime::new(2025, 2, 10, 9, 0, 0.0);
    let entries = wolun(&engine, &c, 2025, &now).unwrap();
    assert_eq!(entries.len(), 12);
    // Early February sits in the Ipchun month, the first of the year.
    assert!(entries[0].is_current);
    // Month pillars step consecutively through the cycle.
    for pair in entries.windows(2) {
        assert_eq!(pair[1].period.cycle, pair[0].period.cycle.offset(1));
    }
}

#[test]
fn match_search_histogram_and_extremes() {
    let engine = TermEngine::new();
    let c = chart(&engine, 1990, 5, 15, Some((10, 30)));
    let result = find_best_and_worst(&c, true, 1995);

    let total: u32 = result.distribution.iter().sum();
    assert_eq!(total, 720);
    assert_eq!(result.stats.candidates_scored, 720);

    // Every reported extreme must agree with the histogram's support.
    let best = result.best[0].score;
    let worst = result.worst[0].score;
    assert!(best >= worst);
    assert!(result.distribution[(best / 5).min(20) as usize] > 0);
    assert!(result.distribution[(worst / 5).min(20) as usize] > 0);

    // The per-day averages sit inside the observed extremes.
    for avg in result.per_day_pillar_average {
        assert!(avg >= f64::from(worst));
        assert!(avg <= f64::from(best));
    }
}
