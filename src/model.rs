//! JSON program model exchanged with front ends.
//!
//! A front end parses sources, resolves call targets with its own semantic
//! model and writes one [`FileModel`] per source file. Nodes are listed in
//! pre-order and refer to their children by index.

use crate::core::{
    AnalysisUnit, Error as CoreError, MethodDeclaration, NodeId, NodeKind, SourceFile,
    SyntaxTreeBuilder, TableResolver, TargetDescriptor, TextSpan, TreeError,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramModel {
    pub files: Vec<FileModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileModel {
    pub path: PathBuf,
    #[serde(default)]
    pub generated: bool,
    pub nodes: Vec<NodeModel>,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
    #[serde(default)]
    pub calls: Vec<ResolvedCall>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeModel {
    pub kind: NodeKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub span: TextSpan,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
}

/// Call node together with the target the front end resolved it to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCall {
    pub node: NodeId,
    pub target: TargetDescriptor,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{}: invalid syntax tree: {source}", file.display())]
    Tree {
        file: PathBuf,
        #[source]
        source: TreeError,
    },

    #[error("{}: body {node} of method '{method}' does not exist", file.display())]
    UnknownBody {
        file: PathBuf,
        method: String,
        node: NodeId,
    },

    #[error("{}: resolved call {node} is not an invocation node", file.display())]
    NotAnInvocation { file: PathBuf, node: NodeId },
}

impl ProgramModel {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CoreError::file_system("Cannot read program model", path, e))?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read, parse and validate a model file
    pub fn read_units(path: &Path) -> Result<Vec<AnalysisUnit<TableResolver>>, CoreError> {
        Ok(Self::from_path(path)?.load()?)
    }

    /// Validate every file and turn it into an analysis unit
    pub fn load(self) -> Result<Vec<AnalysisUnit<TableResolver>>, ModelError> {
        self.files.into_iter().map(FileModel::load).collect()
    }
}

impl FileModel {
    pub fn load(self) -> Result<AnalysisUnit<TableResolver>, ModelError> {
        let mut builder = SyntaxTreeBuilder::new(&self.path);
        for node in &self.nodes {
            builder.push(node.kind, node.text.as_str(), node.span);
        }
        for (index, node) in self.nodes.iter().enumerate() {
            let parent = NodeId(index as u32);
            for &child in &node.children {
                builder
                    .attach(parent, child)
                    .map_err(|source| ModelError::Tree {
                        file: self.path.clone(),
                        source,
                    })?;
            }
        }
        let tree = builder.build();

        for method in &self.methods {
            if let Some(body) = method.body.filter(|&id| tree.node(id).is_none()) {
                return Err(ModelError::UnknownBody {
                    file: self.path.clone(),
                    method: method.name.clone(),
                    node: body,
                });
            }
        }

        let mut resolver = TableResolver::new();
        for call in self.calls {
            let is_invocation = tree
                .node(call.node)
                .is_some_and(|n| n.is(NodeKind::Invocation));
            if !is_invocation {
                return Err(ModelError::NotAnInvocation {
                    file: self.path.clone(),
                    node: call.node,
                });
            }
            resolver.insert(call.node, call.target);
        }

        let mut file = SourceFile::new(tree, self.methods);
        file.generated = self.generated;
        Ok(AnalysisUnit::new(file, resolver))
    }
}
