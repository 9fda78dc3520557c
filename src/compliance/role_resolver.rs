//! Role map resolution.
//!
//! Role maps translate a role in one namespace into a role in the same or a
//! different namespace, and may chain or cycle. Resolution follows the chain
//! for at most a fixed number of hops so a cyclic map cannot stall validation.

use super::types::{ComplianceWarning, WarningCode};
use super::violation::ConformanceViolation;
use crate::structure::{roles, NamespaceId, StructTree};
use std::cell::RefCell;
use std::collections::HashSet;

/// End point of a role resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    /// Last role reached
    pub role: String,
    /// Namespace of that role
    pub namespace: Option<NamespaceId>,
    /// False if the hop limit stopped resolution early
    pub complete: bool,
}

/// Resolves roles through the role maps of one structure tree.
pub struct RoleResolver<'a> {
    tree: &'a StructTree,
    max_depth: usize,
    warnings: RefCell<Vec<ComplianceWarning>>,
    reported: RefCell<HashSet<(String, Option<NamespaceId>)>>,
}

impl<'a> RoleResolver<'a> {
    /// Create a resolver giving up after `max_depth` hops.
    pub fn new(tree: &'a StructTree, max_depth: usize) -> Self {
        Self {
            tree,
            max_depth,
            warnings: RefCell::new(Vec::new()),
            reported: RefCell::new(HashSet::new()),
        }
    }

    /// Resolve `role` in `namespace` to a standard role.
    ///
    /// Returns `None` only when `role` is `None`. Roles without a mapping come
    /// back unchanged.
    pub fn resolve_to_standard_role(
        &self,
        role: Option<&str>,
        namespace: Option<NamespaceId>,
    ) -> Option<String> {
        role.map(|r| self.resolve(r, namespace).role)
    }

    /// Resolve `role` in `namespace`, keeping the final namespace.
    pub fn resolve(&self, role: &str, namespace: Option<NamespaceId>) -> ResolvedRole {
        let mut current = role.to_string();
        let mut current_ns = namespace;

        for _ in 0..self.max_depth {
            match self.lookup(&current, current_ns) {
                Some((next, next_ns)) => {
                    current = next.to_string();
                    current_ns = next_ns;
                },
                None => {
                    return ResolvedRole {
                        role: current,
                        namespace: current_ns,
                        complete: true,
                    };
                },
            }
        }

        if self.lookup(&current, current_ns).is_none() {
            return ResolvedRole {
                role: current,
                namespace: current_ns,
                complete: true,
            };
        }

        self.report_limit(role, namespace, &current);
        ResolvedRole {
            role: current,
            namespace: current_ns,
            complete: false,
        }
    }

    /// Check that no namespace role map resolves back into its own namespace.
    ///
    /// Each mapping chain is followed until it leaves the role maps or
    /// revisits a (role, namespace) pair. Reaching the starting namespace at
    /// any hop is a violation.
    pub fn check_no_self_namespace_mapping(&self) -> Result<(), ConformanceViolation> {
        for (ns_id, ns) in self.tree.namespaces() {
            for (role, mapping) in &ns.role_map {
                let mut seen = HashSet::new();
                let mut current = (mapping.role.as_str(), mapping.namespace);
                loop {
                    if current.1 == Some(ns_id) {
                        return Err(ConformanceViolation::RoleMappedToSelfNamespace {
                            role: role.clone(),
                            namespace: ns.name.clone(),
                        });
                    }
                    if !seen.insert(current) {
                        break;
                    }
                    match self.lookup(current.0, current.1) {
                        Some(next) => current = next,
                        None => break,
                    }
                }
            }
        }
        Ok(())
    }

    /// Check that the default role map does not remap PDF 1.7 standard types.
    pub fn check_no_standard_remapping(&self) -> Result<(), ConformanceViolation> {
        match self
            .tree
            .role_map()
            .keys()
            .find(|role| roles::is_pdf_1_7_standard(role))
        {
            Some(role) => Err(ConformanceViolation::StandardRoleRemapped { role: role.clone() }),
            None => Ok(()),
        }
    }

    /// Take the diagnostics recorded so far.
    pub fn take_warnings(&self) -> Vec<ComplianceWarning> {
        std::mem::take(&mut *self.warnings.borrow_mut())
    }

    fn lookup(&self, role: &str, namespace: Option<NamespaceId>) -> Option<(&'a str, Option<NamespaceId>)> {
        let tree: &'a StructTree = self.tree;
        tree.role_map_for(namespace)
            .and_then(|map| map.get(role))
            .map(|m| (m.role.as_str(), m.namespace))
    }

    fn report_limit(&self, role: &str, namespace: Option<NamespaceId>, last: &str) {
        if !self.reported.borrow_mut().insert((role.to_string(), namespace)) {
            return;
        }
        log::warn!(
            "Role '{}' not resolved after {} role map hops, using '{}'",
            role,
            self.max_depth,
            last
        );
        self.warnings.borrow_mut().push(
            ComplianceWarning::new(
                WarningCode::RoleResolutionLimit,
                format!(
                    "Role resolution stopped after {} hops; using '{}'",
                    self.max_depth, last
                ),
            )
            .with_location(format!("role '{}'", role)),
        );
    }
}
