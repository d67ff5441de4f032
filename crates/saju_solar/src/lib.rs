//! Solar-term astronomy for the saju engine.
//!
//! This crate provides:
//! - The apparent solar ecliptic longitude series
//! - The 12 month-boundary solar terms and their target longitudes
//! - [`TermEngine`]: exact term instants via bracketing scan + bisection,
//!   memoized per `(year, term)`

pub mod engine;
pub mod error;
pub mod sun;
pub mod terms;

pub use engine::{TermBoundary, TermCacheStats, TermEngine};
pub use error::TermError;
pub use sun::{jd_to_centuries, longitude_offset, normalize_360, sun_apparent_longitude};
pub use terms::{ALL_TERMS, SolarTerm};
