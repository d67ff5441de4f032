//! Sexagenary cycle arithmetic and stem/branch classification.
//!
//! This crate provides:
//! - Stems, branches, and the five elements with polarity
//! - [`CycleIndex`]: 60-cycle modular arithmetic for day/year/month/hour
//! - Hidden-stem decomposition tables per branch
//! - Ten-god and twelve-stage classification (pure index functions)
//! - The fixed structural-relation tables (combine/clash/punishment/
//!   break/harm, pairwise and triple)

pub mod branch;
pub mod cycle;
pub mod element;
pub mod relations;
pub mod stem;
pub mod ten_god;
pub mod twelve_stage;

pub use branch::{ALL_BRANCHES, Branch, HiddenStem};
pub use cycle::{CycleIndex, hour_branch_for_minutes};
pub use element::{ALL_ELEMENTS, Element};
pub use stem::{ALL_STEMS, Stem};
pub use ten_god::{ALL_TEN_GOD_GROUPS, ALL_TEN_GODS, TenGod, TenGodGroup, ten_god};
pub use twelve_stage::{ALL_STAGES, TwelveStage, twelve_stage};
