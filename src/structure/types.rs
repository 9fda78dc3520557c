//! Types for PDF logical structure trees.
//!
//! Implements structure element types according to ISO 32000-1:2008 Section 14.7.2
//! and the namespace extension of ISO 32000-2:2020 Section 14.7.4.
//!
//! The tree is an arena: nodes are owned by [`StructTree`] and refer to each
//! other by [`NodeId`]. Parent links are plain ids, used only for upward
//! lookups.

use indexmap::IndexMap;
use std::fmt;

/// Index of a node in a [`StructTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a namespace in a [`StructTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespaceId(pub(crate) usize);

/// Target of a role map entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMapping {
    /// Role the source role maps to
    pub role: String,
    /// Namespace of the target role (`None` = the document-wide default map)
    pub namespace: Option<NamespaceId>,
}

impl RoleMapping {
    /// Mapping into the default role map.
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            namespace: None,
        }
    }

    /// Mapping into an explicit namespace.
    pub fn in_namespace(role: impl Into<String>, namespace: NamespaceId) -> Self {
        Self {
            role: role.into(),
            namespace: Some(namespace),
        }
    }
}

/// A structure namespace (PDF 2.0 `/Namespace` dictionary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Namespace name (`/NS`), usually a URI
    pub name: String,
    /// Role map for this namespace (`/RoleMapNS`)
    pub role_map: IndexMap<String, RoleMapping>,
}

impl Namespace {
    /// Create a namespace without a role map.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role_map: IndexMap::new(),
        }
    }
}

/// Owner of an attribute set (`/O` entry of an attribute object).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeOwner {
    /// Table attributes
    Table,
    /// List attributes
    List,
    /// Layout attributes
    Layout,
    /// PrintField attributes
    PrintField,
    /// Any other owner (NSO, application-specific owners)
    Other(String),
}

/// Attribute key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    /// Table header scope
    Scope,
    /// Number of rows a cell spans
    RowSpan,
    /// Number of columns a cell spans
    ColSpan,
    /// IDs of header cells associated with a cell
    Headers,
    /// Numbering style of a list
    ListNumbering,
    /// Footnote/endnote type (PDF 2.0)
    NoteType,
    /// Table summary
    Summary,
    /// Any other key
    Other(String),
}

impl AttributeKey {
    /// Parse an attribute key from its PDF name.
    pub fn from_pdf_name(name: &str) -> Self {
        match name {
            "Scope" => Self::Scope,
            "RowSpan" => Self::RowSpan,
            "ColSpan" => Self::ColSpan,
            "Headers" => Self::Headers,
            "ListNumbering" => Self::ListNumbering,
            "NoteType" => Self::NoteType,
            "Summary" => Self::Summary,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// PDF name
    Name(String),
    /// PDF string (decoded to text)
    Text(String),
    /// Integer
    Integer(i64),
    /// Array of values
    Array(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Name or text content.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Name(s) | AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Flatten into a list of strings. A single name or string counts as a
    /// one-element list; non-string array members are skipped.
    pub fn to_string_list(&self) -> Vec<String> {
        match self {
            AttributeValue::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            other => other.as_str().map(|s| vec![s.to_string()]).unwrap_or_default(),
        }
    }
}

/// One attribute object attached to a structure element.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSet {
    /// Owner of these attributes
    pub owner: AttributeOwner,
    /// Entries in document order
    pub entries: IndexMap<AttributeKey, AttributeValue>,
}

impl AttributeSet {
    /// Create an empty attribute set for an owner.
    pub fn new(owner: AttributeOwner) -> Self {
        Self {
            owner,
            entries: IndexMap::new(),
        }
    }

    /// Add an entry (builder style).
    pub fn with(mut self, key: AttributeKey, value: AttributeValue) -> Self {
        self.entries.insert(key, value);
        self
    }

    /// Get an entry.
    pub fn get(&self, key: &AttributeKey) -> Option<&AttributeValue> {
        self.entries.get(key)
    }
}

/// A structure element (StructElem) in the structure tree.
///
/// According to PDF spec Section 14.7.2, each StructElem has:
/// - `/S` - Structure type (e.g., /Document, /P, /H1, /Sect)
/// - `/NS` - Namespace of the structure type (PDF 2.0, optional)
/// - `/K` - Children (structure elements or content references)
/// - `/Ref` - Non-child references to other structure elements (PDF 2.0)
/// - `/A` - Attributes (optional)
/// - `/ID` - Element identifier (optional)
#[derive(Debug, Clone, PartialEq)]
pub struct StructElem {
    /// Structure type as written in the document (e.g., "P", "H1", "MyHeading")
    pub role: String,

    /// Namespace of the role, if any
    pub namespace: Option<NamespaceId>,

    /// Attribute sets, in document order
    pub attributes: Vec<AttributeSet>,

    /// Child nodes in document order
    pub children: Vec<NodeId>,

    /// Referenced elements (`/Ref`)
    pub references: Vec<NodeId>,

    /// Element identifier (`/ID`)
    pub id: Option<String>,
}

impl StructElem {
    /// Create a new structure element
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            namespace: None,
            attributes: Vec::new(),
            children: Vec::new(),
            references: Vec::new(),
            id: None,
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: NamespaceId) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Set the element identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach an attribute set.
    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes.push(attributes);
        self
    }

    /// First value for `key` across all attribute sets, preferring sets
    /// owned by `preferred` when given.
    pub fn attribute(
        &self,
        key: &AttributeKey,
        preferred: Option<&AttributeOwner>,
    ) -> Option<&AttributeValue> {
        if let Some(owner) = preferred {
            let owned = self
                .attributes
                .iter()
                .filter(|set| &set.owner == owner)
                .find_map(|set| set.get(key));
            if owned.is_some() {
                return owned;
            }
        }
        self.attributes.iter().find_map(|set| set.get(key))
    }
}

/// What an object reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjRefTarget {
    /// Marked-content sequence on a page
    MarkedContent {
        /// Marked Content ID
        mcid: u32,
    },
    /// Annotation on a page, by its index in the page's `/Annots` array
    Annotation {
        /// Annotation index
        index: usize,
    },
}

/// Leaf node referring to content on a page (MCR or OBJR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjRef {
    /// Page index
    pub page: usize,
    /// Referenced object
    pub target: ObjRefTarget,
}

/// A node in the structure tree.
#[derive(Debug, Clone, PartialEq)]
pub enum StructNode {
    /// The StructTreeRoot
    Root {
        /// Top-level elements
        children: Vec<NodeId>,
    },
    /// A structure element
    Elem(StructElem),
    /// An object or marked-content reference
    ObjRef(ObjRef),
}

#[derive(Debug, Clone)]
pub(crate) struct NodeSlot {
    pub(crate) parent: Option<NodeId>,
    pub(crate) node: StructNode,
}

/// The root of a PDF structure tree together with its namespaces and role maps.
///
/// According to PDF spec Section 14.7.2, the StructTreeRoot contains:
/// - `/K` - The immediate child or children of the structure tree root
/// - `/RoleMap` - Maps non-standard structure types to standard ones
/// - `/Namespaces` - Namespaces used in the tree (PDF 2.0)
#[derive(Debug, Clone)]
pub struct StructTree {
    pub(crate) nodes: Vec<NodeSlot>,
    pub(crate) namespaces: Vec<Namespace>,
    pub(crate) role_map: IndexMap<String, RoleMapping>,
}

impl StructTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![NodeSlot {
                parent: None,
                node: StructNode::Root {
                    children: Vec::new(),
                },
            }],
            namespaces: Vec::new(),
            role_map: IndexMap::new(),
        }
    }

    /// Id of the StructTreeRoot node.
    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// Handle to the StructTreeRoot node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: self.root_id(),
        }
    }

    /// Handle to a node, if the id belongs to this tree.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Namespace by id.
    pub fn namespace(&self, id: NamespaceId) -> Option<&Namespace> {
        self.namespaces.get(id.0)
    }

    /// All namespaces with their ids.
    pub fn namespaces(&self) -> impl Iterator<Item = (NamespaceId, &Namespace)> + '_ {
        self.namespaces
            .iter()
            .enumerate()
            .map(|(i, ns)| (NamespaceId(i), ns))
    }

    /// The document-wide default role map (`/RoleMap`).
    pub fn role_map(&self) -> &IndexMap<String, RoleMapping> {
        &self.role_map
    }

    /// Role map to consult for a namespace (`None` = default map).
    pub fn role_map_for(&self, namespace: Option<NamespaceId>) -> Option<&IndexMap<String, RoleMapping>> {
        match namespace {
            None => Some(&self.role_map),
            Some(id) => self.namespace(id).map(|ns| &ns.role_map),
        }
    }

    /// Every node in arena order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        (0..self.nodes.len()).map(move |i| NodeRef {
            tree: self,
            id: NodeId(i),
        })
    }
}

/// Borrowed handle to a node in a [`StructTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a StructTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Node id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Tree the node belongs to.
    pub fn tree(&self) -> &'a StructTree {
        self.tree
    }

    /// The underlying node.
    pub fn node(&self) -> &'a StructNode {
        &self.tree.nodes[self.id.0].node
    }

    /// Structure element data, if this is an element.
    pub fn as_elem(&self) -> Option<&'a StructElem> {
        match self.node() {
            StructNode::Elem(e) => Some(e),
            _ => None,
        }
    }

    /// Object reference data, if this is one.
    pub fn as_obj_ref(&self) -> Option<&'a ObjRef> {
        match self.node() {
            StructNode::ObjRef(r) => Some(r),
            _ => None,
        }
    }

    /// True for the StructTreeRoot.
    pub fn is_root(&self) -> bool {
        matches!(self.node(), StructNode::Root { .. })
    }

    /// Role as written, for elements.
    pub fn role(&self) -> Option<&'a str> {
        self.as_elem().map(|e| e.role.as_str())
    }

    /// Namespace of the role, for elements.
    pub fn namespace(&self) -> Option<NamespaceId> {
        self.as_elem().and_then(|e| e.namespace)
    }

    /// Attribute sets, for elements.
    pub fn attributes(&self) -> &'a [AttributeSet] {
        self.as_elem().map(|e| e.attributes.as_slice()).unwrap_or(&[])
    }

    /// Element identifier.
    pub fn element_id(&self) -> Option<&'a str> {
        self.as_elem().and_then(|e| e.id.as_deref())
    }

    /// Non-owning parent.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree.nodes[self.id.0].parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    fn child_ids(&self) -> &'a [NodeId] {
        match self.node() {
            StructNode::Root { children } => children,
            StructNode::Elem(e) => &e.children,
            StructNode::ObjRef(_) => &[],
        }
    }

    /// Children in document order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.child_ids().iter().map(move |&id| NodeRef { tree, id })
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.child_ids().len()
    }

    /// Referenced elements (`/Ref`) in document order.
    pub fn references(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        let ids: &'a [NodeId] = self.as_elem().map(|e| e.references.as_slice()).unwrap_or(&[]);
        ids.iter().map(move |&id| NodeRef { tree, id })
    }

    /// True if this element lists `other` in its references.
    pub fn references_node(&self, other: NodeId) -> bool {
        self.as_elem()
            .map(|e| e.references.contains(&other))
            .unwrap_or(false)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("node", self.node())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}
