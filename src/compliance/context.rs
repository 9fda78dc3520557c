//! Read-only view of a document for one validation run.

use super::role_resolver::{ResolvedRole, RoleResolver};
use super::types::{ComplianceWarning, PdfUaLevel, UaValidationStats};
use super::violation::ConformanceViolation;
use crate::config::ValidatorOptions;
use crate::document::{Annotation, TaggedDocument};
use crate::error::{Error, Result};
use crate::structure::{roles, NamespaceId, NodeId, NodeRef, ObjRef, ObjRefTarget, StructTree};
use std::cell::RefCell;
use std::collections::HashMap;

/// Lookups shared by every checker in a run.
///
/// Created fresh per run; holds the role resolver, the annotation index and
/// the run's counters.
pub struct ValidationContext<'a> {
    document: &'a TaggedDocument,
    tree: &'a StructTree,
    options: ValidatorOptions,
    resolver: RoleResolver<'a>,
    obj_refs: HashMap<(usize, usize), NodeId>,
    warnings: RefCell<Vec<ComplianceWarning>>,
    stats: RefCell<UaValidationStats>,
}

impl<'a> ValidationContext<'a> {
    /// Build the context. Fails if the document has no structure tree.
    pub fn new(document: &'a TaggedDocument, options: ValidatorOptions) -> Result<Self> {
        let options = options.validated()?;
        let tree = document
            .structure
            .as_ref()
            .ok_or(Error::Conformance(ConformanceViolation::MissingStructTreeRoot))?;

        let mut obj_refs = HashMap::new();
        for node in tree.iter() {
            if let Some(ObjRef {
                page,
                target: ObjRefTarget::Annotation { index },
            }) = node.as_obj_ref()
            {
                obj_refs.entry((*page, *index)).or_insert(node.id());
            }
        }
        log::debug!(
            "Validation context: {} nodes, {} annotation references, level {}",
            tree.len(),
            obj_refs.len(),
            options.level
        );

        Ok(Self {
            document,
            tree,
            options,
            resolver: RoleResolver::new(tree, options.max_role_resolution_depth),
            obj_refs,
            warnings: RefCell::new(Vec::new()),
            stats: RefCell::new(UaValidationStats::default()),
        })
    }

    /// Document under validation.
    pub fn document(&self) -> &'a TaggedDocument {
        self.document
    }

    /// Its structure tree.
    pub fn tree(&self) -> &'a StructTree {
        self.tree
    }

    /// Options of this run.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Conformance level of this run.
    pub fn level(&self) -> PdfUaLevel {
        self.options.level
    }

    /// The role resolver.
    pub fn resolver(&self) -> &RoleResolver<'a> {
        &self.resolver
    }

    /// Resolve a role string in a namespace.
    pub fn resolve(&self, role: &str, namespace: Option<NamespaceId>) -> ResolvedRole {
        self.resolver.resolve(role, namespace)
    }

    /// Standard role of a node (`None` for the root and object references).
    pub fn resolve_role(&self, node: NodeRef<'_>) -> Option<String> {
        self.resolver
            .resolve_to_standard_role(node.role(), node.namespace())
    }

    /// True if `node` is an element whose role resolves to `role`.
    pub fn has_role(&self, node: NodeRef<'_>, role: &str) -> bool {
        self.resolve_role(node).as_deref() == Some(role)
    }

    /// Whether a resolution result names a standard structure type for this level.
    ///
    /// PDF/UA-1 knows only the PDF 1.7 types, whatever namespace an element
    /// claims.
    pub fn is_standard(&self, resolved: &ResolvedRole) -> bool {
        let namespace = resolved
            .namespace
            .and_then(|id| self.tree.namespace(id))
            .map(|ns| ns.name.as_str());
        match (self.level(), namespace) {
            (PdfUaLevel::Ua1, _) => roles::is_pdf_1_7_standard(&resolved.role),
            (PdfUaLevel::Ua2, None) => {
                roles::is_pdf_1_7_standard(&resolved.role) || roles::is_pdf_2_0_standard(&resolved.role)
            },
            (_, Some(roles::PDF_1_7_NAMESPACE)) => roles::is_pdf_1_7_standard(&resolved.role),
            (_, Some(roles::PDF_2_0_NAMESPACE)) => roles::is_pdf_2_0_standard(&resolved.role),
            // MathML elements are standard in their own namespace.
            (_, Some(name)) => roles::is_standard_namespace(name),
        }
    }

    /// Object reference occupying annotation slot `(page, index)`.
    pub fn find_obj_ref(&self, page: usize, index: usize) -> Option<NodeRef<'a>> {
        self.obj_refs
            .get(&(page, index))
            .and_then(|&id| self.tree.node(id))
    }

    /// Annotation an object reference points at (`None` for marked content).
    pub fn annotation_for(&self, obj_ref: &ObjRef) -> Result<Option<&'a Annotation>> {
        match obj_ref.target {
            ObjRefTarget::MarkedContent { .. } => Ok(None),
            ObjRefTarget::Annotation { index } => self
                .document
                .annotation(obj_ref.page, index)
                .map(Some)
                .ok_or_else(|| {
                    Error::InvalidStructure(format!(
                        "object reference to missing annotation {} on page {}",
                        index, obj_ref.page
                    ))
                }),
        }
    }

    /// Record a non-fatal finding.
    pub fn add_warning(&self, warning: ComplianceWarning) {
        self.warnings.borrow_mut().push(warning);
    }

    /// Update the run counters.
    pub fn record(&self, update: impl FnOnce(&mut UaValidationStats)) {
        update(&mut self.stats.borrow_mut());
    }

    /// Snapshot of the run counters.
    pub fn stats(&self) -> UaValidationStats {
        self.stats.borrow().clone()
    }

    /// Take every warning recorded so far, resolver diagnostics included.
    pub fn take_warnings(&self) -> Vec<ComplianceWarning> {
        let mut warnings = std::mem::take(&mut *self.warnings.borrow_mut());
        warnings.extend(self.resolver.take_warnings());
        warnings
    }
}
