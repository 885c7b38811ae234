//! Testing infrastructure for iosplint.
//!
//! - **[`sketch`]**: build syntax trees and resolved calls from Rust code
//!   instead of JSON, for unit, integration and benchmark code alike.
//! - **[`analyze_sketch`]**: run the default analyzer over one sketch.
//!
//! # Quick Start
//!
//! ```
//! use iosplint::testkit::{analyze_sketch, sketch::*};
//!
//! let file = FileSketch::new("A.cs").method(method(
//!     "Integration",
//!     [call("Operation()").user(), call("42.ToString()").external("System", "Int32")],
//! ));
//!
//! let diagnostics = analyze_sketch(&file);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].metric, 1);
//! ```

pub mod sketch;

use crate::core::CancellationToken;
use crate::diagnostics::Diagnostic;
use crate::iosp::IospAnalyzer;
use sketch::FileSketch;

/// Diagnostics the default analyzer reports for `file`
pub fn analyze_sketch(file: &FileSketch) -> Vec<Diagnostic> {
    analyze_sketch_with(&IospAnalyzer::new().with_parallel(false), file)
}

pub fn analyze_sketch_with(analyzer: &IospAnalyzer, file: &FileSketch) -> Vec<Diagnostic> {
    let unit = file.unit();
    analyzer.analyze_file(&unit.file, &unit.resolver, &CancellationToken::new())
}
