//! Solar-term instant resolution with an append-only memoization cache.
//!
//! [`TermEngine`] is `Send + Sync`; it can be shared across threads via
//! `Arc<TermEngine>`. Entries are immutable once written and never
//! evicted: the domain's cardinality (12 terms x realistic year range) is
//! small and bounded.

use std::collections::HashMap;
use std::sync::Mutex;

use saju_time::{KST_UTC_OFFSET_DAYS, LocalDateTime, calendar_to_jd};

use crate::error::TermError;
use crate::sun::longitude_offset;
use crate::terms::{ALL_TERMS, SolarTerm};

/// Days scanned forward from the seed before giving up.
const SCAN_WINDOW_DAYS: i32 = 50;

/// Days before the term's expected date at which the scan starts.
const SEED_LEAD_DAYS: f64 = 20.0;

/// Bisection iterations; 52 halvings of one day reach far below one second.
const BISECTION_ITERATIONS: u32 = 52;

/// A resolved month boundary: the term, its exact local instant, and the
/// local-civil Julian Date used for interval comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermBoundary {
    pub term: SolarTerm,
    pub jd_local: f64,
    pub instant: LocalDateTime,
}

/// Cache telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TermCacheStats {
    pub entries: usize,
    pub hits: u64,
}

/// Resolves solar-term instants, memoizing per `(saju_year, term)`.
#[derive(Debug, Default)]
pub struct TermEngine {
    cache: Mutex<CacheInner>,
}

#[derive(Debug, Default)]
struct CacheInner {
    map: HashMap<(i32, SolarTerm), f64>,
    hits: u64,
}

impl TermEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact local-civil Julian Date of `term` in saju year `year`.
    pub fn find_term_jd(&self, year: i32, term: SolarTerm) -> Result<f64, TermError> {
        {
            let mut inner = self.cache.lock().expect("term cache poisoned");
            if let Some(&jd) = inner.map.get(&(year, term)) {
                inner.hits += 1;
                return Ok(jd);
            }
        }

        let jd = self.compute_term_jd(year, term)?;

        let mut inner = self.cache.lock().expect("term cache poisoned");
        inner.map.insert((year, term), jd);
        Ok(jd)
    }

    /// Exact local (KST) instant of `term` in saju year `year`.
    pub fn find_term_instant(&self, year: i32, term: SolarTerm) -> Result<LocalDateTime, TermError> {
        Ok(LocalDateTime::from_jd(self.find_term_jd(year, term)?))
    }

    /// The 12 month boundaries of a saju year plus the following year's
    /// Ipchun as a trailing sentinel (13 entries, strictly increasing).
    pub fn boundaries_for_year(&self, saju_year: i32) -> Result<Vec<TermBoundary>, TermError> {
        let mut out = Vec::with_capacity(ALL_TERMS.len() + 1);
        for term in ALL_TERMS {
            let jd_local = self.find_term_jd(saju_year, term)?;
            out.push(TermBoundary {
                term,
                jd_local,
                instant: LocalDateTime::from_jd(jd_local),
            });
        }
        let next_ipchun = self.find_term_jd(saju_year + 1, SolarTerm::Ipchun)?;
        out.push(TermBoundary {
            term: SolarTerm::Ipchun,
            jd_local: next_ipchun,
            instant: LocalDateTime::from_jd(next_ipchun),
        });
        Ok(out)
    }

    pub fn stats(&self) -> TermCacheStats {
        let inner = self.cache.lock().expect("term cache poisoned");
        TermCacheStats {
            entries: inner.map.len(),
            hits: inner.hits,
        }
    }

    /// Daily bracketing scan plus bisection refinement, in UT; the result
    /// is shifted to local-civil JD by the fixed KST offset.
    fn compute_term_jd(&self, year: i32, term: SolarTerm) -> Result<f64, TermError> {
        let target = term.target_longitude_deg();
        let (year_offset, month, day) = term.approx_civil_date();

        let seed_local = calendar_to_jd(year + year_offset, month, day as f64);
        let mut jd = seed_local - KST_UTC_OFFSET_DAYS - SEED_LEAD_DAYS;

        let mut prev_offset = longitude_offset(jd, target);
        for _ in 0..SCAN_WINDOW_DAYS {
            let next = jd + 1.0;
            let offset = longitude_offset(next, target);
            // The offset wraps from just below 360 to just above 0 when the
            // Sun crosses the target longitude.
            if prev_offset > 300.0 && offset < 60.0 {
                let refined = bisect_crossing(jd, next, target);
                return Ok(refined + KST_UTC_OFFSET_DAYS);
            }
            jd = next;
            prev_offset = offset;
        }

        Err(TermError::TermNotFound { year, term })
    }
}

/// Refine a bracketed crossing `[lo, hi]` (offset above 300 at `lo`,
/// below 60 at `hi`) by fixed-iteration bisection.
fn bisect_crossing(mut lo: f64, mut hi: f64, target: f64) -> f64 {
    for _ in 0..BISECTION_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if longitude_offset(mid, target) > 300.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

// Compile-time assertion: TermEngine must be Send + Sync.
#[allow(dead_code)]
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn check() {
        assert_send_sync::<TermEngine>();
    }
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipchun_2024_lands_on_february_4() {
        let engine = TermEngine::new();
        let t = engine
            .find_term_instant(2024, SolarTerm::Ipchun)
            .expect("ipchun should resolve");
        assert_eq!((t.year, t.month, t.day), (2024, 2, 4));
        // Published KST instant is 17:27; allow series truncation slack.
        assert!((15..=19).contains(&t.hour), "hour was {}", t.hour);
    }

    #[test]
    fn sohan_belongs_to_next_calendar_year() {
        let engine = TermEngine::new();
        let t = engine
            .find_term_instant(2023, SolarTerm::Sohan)
            .expect("sohan should resolve");
        assert_eq!(t.year, 2024);
        assert_eq!(t.month, 1);
        assert!((5..=7).contains(&t.day), "day was {}", t.day);
    }

    #[test]
    fn boundaries_strictly_increase() {
        let engine = TermEngine::new();
        let bounds = engine.boundaries_for_year(1990).expect("boundaries");
        assert_eq!(bounds.len(), 13);
        for pair in bounds.windows(2) {
            assert!(pair[0].jd_local < pair[1].jd_local);
        }
    }

    #[test]
    fn repeated_lookups_hit_the_cache() {
        let engine = TermEngine::new();
        let a = engine.find_term_jd(2020, SolarTerm::Mangjong).unwrap();
        let b = engine.find_term_jd(2020, SolarTerm::Mangjong).unwrap();
        assert_eq!(a, b);
        let stats = engine.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn term_instant_matches_target_longitude() {
        let engine = TermEngine::new();
        let jd_local = engine.find_term_jd(2000, SolarTerm::Hallo).unwrap();
        let offset = longitude_offset(jd_local - KST_UTC_OFFSET_DAYS, 195.0);
        let dist = offset.min(360.0 - offset);
        assert!(dist < 1e-6, "residual offset {dist}");
    }
}
