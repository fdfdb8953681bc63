//! Stage layer: closed categorical vocabularies + the configurable stage chain.
//!
//! This module is intentionally separate from csv parsing and rendering.
//! It owns:
//! - the category enums (Pclass, Sex, AgeGroup, Outcome) and their labels
//! - the Stage chain parsed from the CLI

pub mod category;
pub mod chain;

pub use category::{AgeGroup, Outcome, Pclass, Sex};
pub use chain::{Stage, parse_stage_list};
