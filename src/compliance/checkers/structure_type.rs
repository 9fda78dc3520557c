use crate::compliance::{ConformanceViolation, ValidationContext};
use crate::error::Result;
use crate::structure::{NodeRef, StructureHandler};

/// Every element must resolve to a standard structure type.
pub struct StructureTypeChecker<'a> {
    context: &'a ValidationContext<'a>,
}

impl<'a> StructureTypeChecker<'a> {
    /// Create the checker.
    pub fn new(context: &'a ValidationContext<'a>) -> Self {
        Self { context }
    }
}

impl StructureHandler for StructureTypeChecker<'_> {
    fn name(&self) -> &'static str {
        "StructureTypeChecker"
    }

    fn accept(&self, node: NodeRef<'_>) -> bool {
        node.as_elem().is_some()
    }

    fn process(&mut self, node: NodeRef<'_>) -> Result<()> {
        let Some(role) = node.role() else {
            return Ok(());
        };
        let resolved = self.context.resolve(role, node.namespace());
        if self.context.is_standard(&resolved) {
            return Ok(());
        }
        Err(ConformanceViolation::NonStandardRole {
            role: role.to_string(),
            resolved: resolved.role,
        }
        .into())
    }
}
