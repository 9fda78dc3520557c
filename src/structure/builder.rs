//! Structure tree builder.
//!
//! The document model hands the validator a finished tree; this builder is the
//! way that tree gets assembled. Every id passed in is checked against the
//! arena so the validator never sees dangling links.
//!
//! PDF Spec: ISO 32000-1:2008, Section 14.7-14.8

use crate::error::{Error, Result};
use crate::structure::types::{
    Namespace, NamespaceId, NodeId, NodeSlot, ObjRef, ObjRefTarget, RoleMapping, StructElem,
    StructNode, StructTree,
};

/// Builds a [`StructTree`] node by node.
///
/// # Example
///
/// ```
/// use pdf_ua_structure::structure::{StructElem, StructTreeBuilder};
///
/// let mut builder = StructTreeBuilder::new();
/// let root = builder.root();
/// let doc = builder.add_elem(root, StructElem::new("Document"))?;
/// let p = builder.add_elem(doc, StructElem::new("P"))?;
/// builder.add_marked_content(p, 0, 0)?;
/// let tree = builder.build();
/// assert_eq!(tree.len(), 4);
/// # Ok::<(), pdf_ua_structure::error::Error>(())
/// ```
pub struct StructTreeBuilder {
    tree: StructTree,
}

impl StructTreeBuilder {
    /// Create a builder holding only the StructTreeRoot.
    pub fn new() -> Self {
        Self {
            tree: StructTree::new(),
        }
    }

    /// Id of the StructTreeRoot.
    pub fn root(&self) -> NodeId {
        self.tree.root_id()
    }

    /// Register a namespace.
    pub fn add_namespace(&mut self, name: impl Into<String>) -> NamespaceId {
        self.tree.namespaces.push(Namespace::new(name));
        NamespaceId(self.tree.namespaces.len() - 1)
    }

    /// Add a role map entry. `namespace = None` writes to the default `/RoleMap`.
    pub fn map_role(
        &mut self,
        namespace: Option<NamespaceId>,
        role: impl Into<String>,
        target: RoleMapping,
    ) -> Result<()> {
        if let Some(ns) = target.namespace {
            self.check_namespace(ns)?;
        }
        let map = match namespace {
            None => &mut self.tree.role_map,
            Some(ns) => {
                self.check_namespace(ns)?;
                &mut self.tree.namespaces[ns.0].role_map
            },
        };
        map.insert(role.into(), target);
        Ok(())
    }

    /// Append a structure element under `parent`.
    pub fn add_elem(&mut self, parent: NodeId, elem: StructElem) -> Result<NodeId> {
        if let Some(ns) = elem.namespace {
            self.check_namespace(ns)?;
        }
        if !elem.children.is_empty() || !elem.references.is_empty() {
            return Err(Error::InvalidStructure(
                "elements must be added without children or references".into(),
            ));
        }
        self.push_child(parent, StructNode::Elem(elem))
    }

    /// Append a marked-content reference under `parent`.
    pub fn add_marked_content(&mut self, parent: NodeId, page: usize, mcid: u32) -> Result<NodeId> {
        self.push_child(
            parent,
            StructNode::ObjRef(ObjRef {
                page,
                target: ObjRefTarget::MarkedContent { mcid },
            }),
        )
    }

    /// Append an annotation object reference under `parent`.
    pub fn add_annotation_ref(&mut self, parent: NodeId, page: usize, index: usize) -> Result<NodeId> {
        self.push_child(
            parent,
            StructNode::ObjRef(ObjRef {
                page,
                target: ObjRefTarget::Annotation { index },
            }),
        )
    }

    /// Record a non-child reference (`/Ref`) from one element to another.
    pub fn add_reference(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.check_node(to)?;
        match self.tree.nodes.get_mut(from.0).map(|slot| &mut slot.node) {
            Some(StructNode::Elem(elem)) => {
                elem.references.push(to);
                Ok(())
            },
            Some(_) => Err(Error::InvalidStructure(format!(
                "node {} cannot carry references",
                from
            ))),
            None => Err(Error::InvalidStructure(format!("node {} does not exist", from))),
        }
    }

    /// Finish building.
    pub fn build(self) -> StructTree {
        self.tree
    }

    fn push_child(&mut self, parent: NodeId, node: StructNode) -> Result<NodeId> {
        self.check_node(parent)?;
        let id = NodeId(self.tree.nodes.len());
        match &mut self.tree.nodes[parent.0].node {
            StructNode::Root { children } => children.push(id),
            StructNode::Elem(elem) => elem.children.push(id),
            StructNode::ObjRef(_) => {
                return Err(Error::InvalidStructure(format!(
                    "object reference {} cannot have children",
                    parent
                )));
            },
        }
        self.tree.nodes.push(NodeSlot {
            parent: Some(parent),
            node,
        });
        Ok(id)
    }

    fn check_node(&self, id: NodeId) -> Result<()> {
        if id.0 < self.tree.nodes.len() {
            Ok(())
        } else {
            Err(Error::InvalidStructure(format!("node {} does not exist", id)))
        }
    }

    fn check_namespace(&self, id: NamespaceId) -> Result<()> {
        if id.0 < self.tree.namespaces.len() {
            Ok(())
        } else {
            Err(Error::InvalidStructure(format!("namespace {} does not exist", id.0)))
        }
    }
}

impl Default for StructTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
