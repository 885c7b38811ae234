//! Arena representation of a parsed method body.
//!
//! Nodes live in a flat vector and refer to each other by [`NodeId`]. Nodes
//! are stored in pre-order: a child always has a larger id than its parent,
//! which rules out cycles without any further bookkeeping.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Syntactic category of a node, as tagged by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Block,
    ExpressionStatement,
    LocalDeclaration,
    Return,
    Throw,
    If,
    Else,
    For,
    ForEach,
    While,
    Do,
    Switch,
    Try,
    Catch,
    Finally,
    Using,
    LocalFunction,
    Lambda,
    Invocation,
    MemberAccess,
    ArgumentList,
    Argument,
    BinaryExpression,
    UnaryExpression,
    Assignment,
    ObjectCreation,
    Await,
    Identifier,
    Literal,
    InterpolatedString,
    Other,
}

/// 1-based line/column range inside a source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl TextSpan {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    #[serde(default)]
    pub span: TextSpan,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, span: TextSpan) -> Self {
        Self {
            file: file.into(),
            span,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file.display(),
            self.span.start_line,
            self.span.start_column
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Source text of the node, used verbatim when reporting expressions
    pub text: String,
    pub span: TextSpan,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Structural problems detected while assembling a tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("node {child} listed as child of {parent} must come after its parent")]
    OutOfOrder { parent: NodeId, child: NodeId },

    #[error("node {child} already has parent {existing}, cannot attach to {parent}")]
    MultipleParents {
        child: NodeId,
        parent: NodeId,
        existing: NodeId,
    },
}

/// Immutable syntax tree of one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    path: PathBuf,
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes.get(id.index()).map(|_| NodeRef { tree: self, id })
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }
}

/// Borrowed handle to a node that can navigate to parents and children
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    fn data(&self) -> &'t Node {
        // NodeRef is only handed out for ids that exist in the arena
        &self.tree.nodes[self.id.index()]
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn text(&self) -> &'t str {
        &self.data().text
    }

    pub fn span(&self) -> TextSpan {
        self.data().span
    }

    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.data().parent.and_then(|p| self.tree.node(p))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .filter_map(move |&child| tree.node(child))
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

/// Incrementally assembles a [`SyntaxTree`], enforcing pre-order ids and
/// single parents.
#[derive(Debug)]
pub struct SyntaxTreeBuilder {
    path: PathBuf,
    nodes: Vec<Node>,
}

impl SyntaxTreeBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: NodeKind, text: impl Into<String>, span: TextSpan) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            text: text.into(),
            span,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if parent.index() >= self.nodes.len() {
            return Err(TreeError::UnknownNode(parent));
        }
        if child.index() >= self.nodes.len() {
            return Err(TreeError::UnknownNode(child));
        }
        if child <= parent {
            return Err(TreeError::OutOfOrder { parent, child });
        }
        if let Some(existing) = self.nodes[child.index()].parent {
            return Err(TreeError::MultipleParents {
                child,
                parent,
                existing,
            });
        }

        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        Ok(())
    }

    pub fn build(self) -> SyntaxTree {
        SyntaxTree {
            path: self.path,
            nodes: self.nodes,
        }
    }
}
