//! Error types for calendar handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar validation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar component is out of range.
    InvalidDate(&'static str),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
        }
    }
}

impl Error for TimeError {}
