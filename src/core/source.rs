use super::ast::{NodeId, SourceLocation, SyntaxTree};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind of member that owns a code block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    #[default]
    Method,
    Constructor,
    Accessor,
    Operator,
    /// Field or property initializer; owns a block but is not a method
    Initializer,
}

impl MemberKind {
    pub fn is_method_like(self) -> bool {
        !matches!(self, MemberKind::Initializer)
    }
}

/// A method declaration as seen from one source file.
///
/// `locations` holds every declaration site known to the front end, which
/// for partial methods can span several files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    /// Carried through from front ends; the analysis reads virtuality from
    /// the call target instead (`TargetDescriptor::is_virtual`)
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub owning_type: String,
    #[serde(default)]
    pub locations: Vec<SourceLocation>,
    /// Root of the method's block body, if it has one
    #[serde(default)]
    pub body: Option<NodeId>,
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            is_virtual: false,
            owning_type: String::new(),
            locations: Vec::new(),
            body: None,
        }
    }

    /// Declaration site inside `file`, ignoring other partial declarations
    pub fn location_in(&self, file: &Path) -> Option<&SourceLocation> {
        self.locations.iter().find(|loc| loc.file == file)
    }
}

/// One analyzed source file: its tree and the methods declared in it
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub tree: SyntaxTree,
    pub methods: Vec<MethodDeclaration>,
    pub generated: bool,
}

impl SourceFile {
    pub fn new(tree: SyntaxTree, methods: Vec<MethodDeclaration>) -> Self {
        Self {
            tree,
            methods,
            generated: false,
        }
    }

    pub fn path(&self) -> &Path {
        self.tree.path()
    }
}

/// A source file paired with the resolver for its call nodes
#[derive(Debug, Clone)]
pub struct AnalysisUnit<R> {
    pub file: SourceFile,
    pub resolver: R,
}

impl<R> AnalysisUnit<R> {
    pub fn new(file: SourceFile, resolver: R) -> Self {
        Self { file, resolver }
    }
}
