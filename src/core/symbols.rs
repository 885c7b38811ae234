//! Symbol resolution seam.
//!
//! The engine never looks at source text to find out what a call targets; it
//! asks a [`SymbolResolver`]. Hosts back this with their semantic model, tests
//! with a [`TableResolver`].

use super::ast::{NodeId, NodeRef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a call node resolves to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// Target is declared in the analyzed sources (user code)
    pub has_user_declaration: bool,
    pub name: String,
    #[serde(default)]
    pub containing_namespace: String,
    /// Simple type name, generic arguments included (e.g. `Func<string>`)
    #[serde(default)]
    pub containing_type: String,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_delegate_invoke: bool,
}

impl TargetDescriptor {
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            has_user_declaration: true,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn external(
        namespace: impl Into<String>,
        containing_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            has_user_declaration: false,
            name: name.into(),
            containing_namespace: namespace.into(),
            containing_type: containing_type.into(),
            ..Self::default()
        }
    }

    pub fn in_type(mut self, namespace: impl Into<String>, containing_type: impl Into<String>) -> Self {
        self.containing_namespace = namespace.into();
        self.containing_type = containing_type.into();
        self
    }

    pub fn virtual_member(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn delegate_invoke(mut self) -> Self {
        self.is_delegate_invoke = true;
        self
    }
}

pub trait SymbolResolver {
    /// Resolve the target of an invocation node, `None` when unresolvable
    fn resolve(&self, call: NodeRef<'_>) -> Option<TargetDescriptor>;
}

/// Resolver backed by a precomputed node -> target table
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    targets: HashMap<NodeId, TargetDescriptor>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: NodeId, target: TargetDescriptor) -> Option<TargetDescriptor> {
        self.targets.insert(node, target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl FromIterator<(NodeId, TargetDescriptor)> for TableResolver {
    fn from_iter<I: IntoIterator<Item = (NodeId, TargetDescriptor)>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

impl SymbolResolver for TableResolver {
    fn resolve(&self, call: NodeRef<'_>) -> Option<TargetDescriptor> {
        self.targets.get(&call.id()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::{NodeKind, SyntaxTreeBuilder, TextSpan};

    #[test]
    fn test_table_resolver_looks_up_by_node() {
        let mut builder = SyntaxTreeBuilder::new("A.cs");
        let call = builder.push(NodeKind::Invocation, "Run()", TextSpan::default());
        let other = builder.push(NodeKind::Invocation, "Stop()", TextSpan::default());
        let tree = builder.build();

        let resolver: TableResolver = [(call, TargetDescriptor::user("Run"))].into_iter().collect();

        assert_eq!(
            resolver.resolve(tree.node(call).unwrap()),
            Some(TargetDescriptor::user("Run"))
        );
        assert_eq!(resolver.resolve(tree.node(other).unwrap()), None);
    }

    #[test]
    fn test_descriptor_builders() {
        let target = TargetDescriptor::external("System", "Object", "ToString").virtual_member();
        assert!(!target.has_user_declaration);
        assert!(target.is_virtual);
        assert_eq!(target.containing_type, "Object");

        let action = TargetDescriptor::user("Invoke")
            .in_type("System", "Action")
            .delegate_invoke();
        assert!(action.is_delegate_invoke);
        assert_eq!(action.containing_namespace, "System");
    }
}
