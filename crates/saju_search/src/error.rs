//! Errors for the timeline, compatibility, and search layer.

use std::error::Error;
use std::fmt;

use saju_base::{Branch, Stem};
use saju_chart::ChartError;
use saju_solar::TermError;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// Chart construction failed for an input.
    Chart(ChartError),
    /// Solar-term resolution failed.
    Term(TermError),
    /// A stem/branch pairing had no sexagenary index (parity mismatch).
    PillarLookupMiss { stem: Stem, branch: Branch },
    /// A caller-supplied range or year was unusable.
    InvalidRange(&'static str),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chart(e) => write!(f, "chart error: {e}"),
            Self::Term(e) => write!(f, "solar term error: {e}"),
            Self::PillarLookupMiss { stem, branch } => {
                write!(f, "no sexagenary index pairs {} with {}", stem.name(), branch.name())
            }
            Self::InvalidRange(msg) => write!(f, "invalid range: {msg}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Chart(e) => Some(e),
            Self::Term(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ChartError> for SearchError {
    fn from(e: ChartError) -> Self {
        Self::Chart(e)
    }
}

impl From<TermError> for SearchError {
    fn from(e: TermError) -> Self {
        Self::Term(e)
    }
}
