//! Error types for chart construction.

use std::error::Error;
use std::fmt::{Display, Formatter};

use saju_base::{Branch, Stem};
use saju_solar::TermError;
use saju_time::TimeError;

/// Errors from building a chart.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ChartError {
    /// A calendar component is out of range (caller input error).
    InvalidDate(&'static str),
    /// Solar-term resolution failed; a defect, never bad user input.
    Term(TermError),
    /// A derived stem/branch pair does not exist in the 60-cycle.
    /// Indicates an internal invariant violation.
    PillarLookupMiss { stem: Stem, branch: Branch },
    /// An internal invariant was violated.
    Internal(&'static str),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::Term(e) => write!(f, "solar term error: {e}"),
            Self::PillarLookupMiss { stem, branch } => {
                write!(
                    f,
                    "no sexagenary entry for {}-{}",
                    stem.name(),
                    branch.name()
                )
            }
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl Error for ChartError {}

impl From<TermError> for ChartError {
    fn from(e: TermError) -> Self {
        Self::Term(e)
    }
}

impl From<TimeError> for ChartError {
    fn from(e: TimeError) -> Self {
        match e {
            TimeError::InvalidDate(msg) => Self::InvalidDate(msg),
            // TimeError is non-exhaustive.
            _ => Self::Internal("unhandled time error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_error_maps_to_invalid_date() {
        let e = ChartError::from(TimeError::InvalidDate("day out of range for month"));
        assert!(matches!(e, ChartError::InvalidDate(_)));
        assert_eq!(e.to_string(), "invalid date: day out of range for month");
    }
}
