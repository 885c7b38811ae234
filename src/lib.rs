// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod io;
pub mod iosp;
pub mod model;
pub mod testkit;

// Re-export commonly used types
pub use crate::core::{
    AnalysisUnit, CancellationToken, MethodDeclaration, NodeId, NodeKind, SourceFile,
    SourceLocation, SymbolResolver, SyntaxTree, TableResolver, TargetDescriptor,
};

pub use crate::config::IospConfig;

pub use crate::diagnostics::{Diagnostic, DiagnosticSink, RuleDescriptor, IOSP_RULE};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter, Report};

pub use crate::iosp::{AnalysisOutcome, ExclusionRule, ExclusionTable, IospAnalyzer};

pub use crate::model::{ModelError, ProgramModel};
