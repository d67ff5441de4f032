//! Error types for the solar-term engine.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::terms::SolarTerm;

/// Errors from solar-term instant resolution.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TermError {
    /// The bracketing scan found no longitude crossing inside the search
    /// window. Signals a defect in the series or the seed date, never bad
    /// user input; always propagated.
    TermNotFound { year: i32, term: SolarTerm },
}

impl Display for TermError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TermNotFound { year, term } => {
                write!(f, "no crossing found for {} in year {year}", term.name())
            }
        }
    }
}

impl Error for TermError {}
