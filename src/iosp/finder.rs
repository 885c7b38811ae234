//! Lazy node search over a [`SyntaxTree`].
//!
//! - [`TraversalMode::Exhaustive`] walks every descendant in pre-order and
//!   yields each match, nested ones included.
//! - [`TraversalMode::LevelStopping`] tests the immediate children of a node.
//!   If any match, those are the result for that branch and neither the
//!   matches nor their siblings are entered. Otherwise every child is
//!   searched the same way. Applied to expressions this yields only the
//!   outermost qualifying expression.

use crate::core::{NodeId, NodeRef, SyntaxTree};
use std::collections::VecDeque;
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    Exhaustive,
    LevelStopping,
}

/// Iterator returned by [`find_nodes`]
pub struct FindNodes<'t, P> {
    tree: &'t SyntaxTree,
    mode: TraversalMode,
    predicate: P,
    /// Exhaustive: nodes still to visit. LevelStopping: nodes to expand.
    pending: Vec<NodeId>,
    ready: VecDeque<NodeId>,
}

/// Search the descendants of `root` for nodes satisfying `predicate`.
///
/// The root itself is never tested. Results come in document order.
pub fn find_nodes<'t, P>(
    tree: &'t SyntaxTree,
    root: NodeId,
    mode: TraversalMode,
    predicate: P,
) -> FindNodes<'t, P>
where
    P: FnMut(NodeRef<'t>) -> bool,
{
    let pending = match mode {
        TraversalMode::Exhaustive => tree.children(root).iter().rev().copied().collect(),
        TraversalMode::LevelStopping => vec![root],
    };
    FindNodes {
        tree,
        mode,
        predicate,
        pending,
        ready: VecDeque::new(),
    }
}

impl<'t, P> FindNodes<'t, P>
where
    P: FnMut(NodeRef<'t>) -> bool,
{
    fn next_exhaustive(&mut self) -> Option<NodeRef<'t>> {
        let tree = self.tree;
        while let Some(id) = self.pending.pop() {
            // stack: push in reverse so the leftmost child is visited first
            self.pending.extend(tree.children(id).iter().rev().copied());
            match tree.node(id) {
                Some(node) if (self.predicate)(node) => return Some(node),
                _ => {}
            }
        }
        None
    }

    fn next_level_stopping(&mut self) -> Option<NodeRef<'t>> {
        loop {
            if let Some(id) = self.ready.pop_front() {
                return self.tree.node(id);
            }
            let id = self.pending.pop()?;
            self.expand(id);
        }
    }

    fn expand(&mut self, id: NodeId) {
        let tree = self.tree;
        let children = tree.children(id);

        for child in children.iter().filter_map(|&c| tree.node(c)) {
            if (self.predicate)(child) {
                self.ready.push_back(child.id());
            }
        }

        if self.ready.is_empty() {
            self.pending.extend(children.iter().rev().copied());
        }
    }
}

impl<'t, P> Iterator for FindNodes<'t, P>
where
    P: FnMut(NodeRef<'t>) -> bool,
{
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.mode {
            TraversalMode::Exhaustive => self.next_exhaustive(),
            TraversalMode::LevelStopping => self.next_level_stopping(),
        }
    }
}

impl<'t, P> FusedIterator for FindNodes<'t, P> where P: FnMut(NodeRef<'t>) -> bool {}
