//! # SplitPay Core
//!
//! Domain types and error definitions for the SplitPay schedule engine.
//! This crate has **no I/O**: it defines the rule model that the
//! normalizer, selector, expander and loader crates work against.
//!
//! ## Design Philosophy
//!
//! The rule model is plain data. Every computation over it (selection,
//! expansion, legal text) lives in `splitpay-rules` as a pure function,
//! and every fetch lives in `splitpay-loader`. This keeps:
//! - Rule documents testable without a network
//! - Results free of hidden per-session state
//! - A clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod language;
pub mod model;

// Re-export key types at crate root for ergonomics
pub use error::{Error, FetchError, Result, RuleLoadError};
pub use language::Language;
pub use model::{
    Band, Column, LegalLines, Months, Range, RuleSet, ScheduleEntry, SelectedTier, Tier, TierMeta,
};
