//! Rules and tag resolution.
//!
//! - [`Rule`]: Comparators that must all hold, plus the tag they select
//! - [`RuleSpec`]: A rule as configured, built or comma-delimited text
//! - [`ResolutionEngine`]: Ordered rules with a fallback, first match wins

pub mod engine;
pub mod rule;

pub use engine::ResolutionEngine;
pub use rule::{ComparatorChain, Rule, RuleSpec};
