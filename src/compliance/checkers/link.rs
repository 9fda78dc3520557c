use crate::compliance::{ConformanceViolation, ValidationContext};
use crate::error::Result;
use crate::structure::{NodeRef, ObjRefTarget, StructureHandler};

/// A `Link` element must contain a reference to its link annotation.
pub struct LinkChecker<'a> {
    context: &'a ValidationContext<'a>,
}

impl<'a> LinkChecker<'a> {
    /// Create the checker.
    pub fn new(context: &'a ValidationContext<'a>) -> Self {
        Self { context }
    }
}

impl StructureHandler for LinkChecker<'_> {
    fn name(&self) -> &'static str {
        "LinkChecker"
    }

    fn accept(&self, node: NodeRef<'_>) -> bool {
        self.context.has_role(node, "Link")
    }

    fn process(&mut self, node: NodeRef<'_>) -> Result<()> {
        let has_annotation = node.children().any(|child| {
            matches!(
                child.as_obj_ref().map(|r| r.target),
                Some(ObjRefTarget::Annotation { .. })
            )
        });
        if has_annotation {
            Ok(())
        } else {
            Err(ConformanceViolation::LinkWithoutAnnotation.into())
        }
    }
}
