//! Fortune timelines, relation detection, compatibility scoring, and
//! the exhaustive best/worst match search.
//!
//! This crate provides:
//! - [`daeun`], [`saeun`], [`wolun`]: decade/year/month fortune timelines
//! - [`detect_relations`]: structural relations among adjacent pillars
//! - [`score_compatibility`]: two-chart category scoring
//! - [`find_best_and_worst`]: full 60x12 pillar-space scan for a target year

pub mod compat;
pub mod error;
pub mod match_search;
pub mod period;
pub mod relation_detect;

pub use compat::{
    Attachment, BASELINE, CategoryScores, CompatibilityResult, score_compatibility,
};
pub use error::SearchError;
pub use match_search::{
    Candidate, MatchSearchResult, MatchStats, SCORE_BUCKETS, find_best_and_worst,
};
pub use period::{DaeunTimeline, Gender, Period, WolunEntry, daeun, saeun, wolun};
pub use relation_detect::{Relation, RelationKind, detect_relations};
