//! # ca-core
//!
//! Core types for constraint-adherence experiments.
//!
//! A trial presents a generation model with a [`ConstraintSet`], collects a
//! [`GenerationResult`], and scores it into an [`AdherenceRecord`] that is
//! flattened into one [`TrialRecord`] row of the shared results log.

pub mod constraint;
pub mod lexicon;
pub mod record;

pub use constraint::ConstraintSet;
pub use lexicon::{load_lexicon, FALLBACK_WORDS};
pub use record::{AdherenceRecord, GenerationResult, TrialRecord};
