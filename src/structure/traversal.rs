//! Structure tree traversal with pluggable handlers.
//!
//! A [`TreeIterator`] performs one pre-order, document-order walk and hands
//! every visited node to each registered [`StructureHandler`] in registration
//! order. Rules live in handlers; the walk knows nothing about them.

use super::types::{NodeRef, StructTree};
use crate::error::Result;

/// A rule applied to structure tree nodes during traversal.
///
/// Handlers never mutate the tree. They may keep state for the duration of
/// one run (e.g. the last heading level seen).
pub trait StructureHandler {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Whether this handler wants to look at `node`.
    fn accept(&self, node: NodeRef<'_>) -> bool;

    /// Check `node`. Only called when [`accept`](Self::accept) returned true.
    fn process(&mut self, node: NodeRef<'_>) -> Result<()>;
}

/// Depth-first, document-order walk dispatching to registered handlers.
pub struct TreeIterator<'h> {
    handlers: Vec<Box<dyn StructureHandler + 'h>>,
    visited: usize,
}

impl<'h> TreeIterator<'h> {
    /// Create an iterator without handlers.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            visited: 0,
        }
    }

    /// Register a handler. Handlers run in registration order at every node.
    pub fn add_handler(&mut self, handler: Box<dyn StructureHandler + 'h>) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Nodes visited by the last traversal.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Walk the subtree rooted at `root`.
    ///
    /// The first error returned by a handler aborts the walk.
    pub fn traverse(&mut self, root: NodeRef<'_>) -> Result<()> {
        self.visited = 0;
        // Explicit stack: children pushed in reverse so they pop in document order.
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            self.visited += 1;
            for handler in self.handlers.iter_mut() {
                if handler.accept(node) {
                    log::trace!("{} processing node {}", handler.name(), node.id());
                    handler.process(node)?;
                }
            }
            let children: Vec<_> = node.children().collect();
            stack.extend(children.into_iter().rev());
        }
        log::debug!(
            "Traversal visited {} nodes with {} handlers",
            self.visited,
            self.handlers.len()
        );
        Ok(())
    }

    /// Walk a whole tree from its StructTreeRoot.
    pub fn traverse_tree(&mut self, tree: &StructTree) -> Result<()> {
        self.traverse(tree.root())
    }
}

impl Default for TreeIterator<'_> {
    fn default() -> Self {
        Self::new()
    }
}
