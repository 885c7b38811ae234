//! Core data model shared by the analysis engine and its host integration.

pub mod ast;
pub mod cancellation;
pub mod errors;
pub mod source;
pub mod symbols;

pub use ast::{
    Node, NodeId, NodeKind, NodeRef, SourceLocation, SyntaxTree, SyntaxTreeBuilder, TextSpan,
    TreeError,
};
pub use cancellation::{CancellationToken, Cancelled};
pub use errors::{Error, Result};
pub use source::{AnalysisUnit, MemberKind, MethodDeclaration, SourceFile};
pub use symbols::{SymbolResolver, TableResolver, TargetDescriptor};
