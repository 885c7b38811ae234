//! Integration/Operation Segregation Principle (IOSP) detection.
//!
//! A method should either integrate (only call other user-defined methods)
//! or operate (compute, call external APIs), never both. The pipeline per
//! method body is:
//!
//! 1. [`finder`] collects call nodes and outermost binary expressions.
//! 2. [`classifier`] resolves calls and sorts them into integrations and
//!    operations, skipping calls matched by the [`exclusions`] table.
//! 3. [`verdict`] decides whether the method mixes both roles and scores it.
//!
//! [`IospAnalyzer`] ties the steps together and emits
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s.

pub mod analyzer;
pub mod classifier;
pub mod exclusions;
pub mod finder;
pub mod ordered;
pub mod verdict;

pub use analyzer::{AnalysisOutcome, IospAnalyzer, SkipReason};
pub use classifier::{
    classify_call, is_computed_expression, CallClass, ClassificationResult, Classifier,
    DiscardReason,
};
pub use exclusions::{ExclusionCategory, ExclusionRule, ExclusionTable};
pub use finder::{find_nodes, FindNodes, TraversalMode};
pub use ordered::OrderedSet;
pub use verdict::{is_violation, render_integrations, render_operations, severity_metric, Verdict};
