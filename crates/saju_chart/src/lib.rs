//! Four-pillar chart construction and element analysis.
//!
//! This crate provides:
//! - [`build_chart`]: birth instant -> immutable four-pillar [`Chart`]
//! - [`weigh`]: cascading weighted element distribution + ten-god histogram
//! - [`resolve_yongsin`]: favorable-element recommendation

pub mod chart;
pub mod error;
pub mod weigher;
pub mod yongsin;

pub use chart::{
    ALL_POSITIONS, BirthInput, Chart, HiddenAnnotation, Pillar, Position, TermContext, build_chart,
};
pub use error::ChartError;
pub use weigher::{
    ElementDistribution, PositionWeights, TenGodCount, WeighConfig, Weighing, weigh,
    weigh_positions,
};
pub use yongsin::{
    DEFICIENCY_THRESHOLD, EXCESS_THRESHOLD, MEDIATOR_THRESHOLD, YongsinResult, resolve_yongsin,
};
