//! PDF Logical Structure (Tagged PDF) support.
//!
//! This module models the logical structure tree of ISO 32000-1:2008
//! Section 14.7 (with the PDF 2.0 namespace additions) in the shape the
//! validator consumes it.
//!
//! ## Structure Tree
//!
//! A structure tree consists of:
//! - **StructTreeRoot**: The root of the structure hierarchy
//! - **StructElem**: Structure elements (paragraphs, headings, tables, ...)
//! - **Object references**: leaves pointing at marked content or annotations
//! - **Namespaces and role maps**: translations of custom roles into
//!   (possibly still custom) other roles
//!
//! ## Traversal
//!
//! [`TreeIterator`] walks the tree in pre-order, document order, and
//! dispatches every node to the registered [`StructureHandler`]s.

mod builder;
pub mod roles;
pub mod table;
pub mod traversal;
mod types;

pub use builder::StructTreeBuilder;
pub use table::{
    CellScope, StructTableIterator, TableCell, TableLayout, TableSection, MAX_TABLE_COLUMNS,
};
pub use traversal::{StructureHandler, TreeIterator};
pub use types::{
    AttributeKey, AttributeOwner, AttributeSet, AttributeValue, Namespace, NamespaceId, NodeId,
    NodeRef, ObjRef, ObjRefTarget, RoleMapping, StructElem, StructNode, StructTree,
};
