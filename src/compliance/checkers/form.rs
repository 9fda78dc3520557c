use crate::annotation_types::AnnotationSubtype;
use crate::compliance::{ConformanceViolation, ValidationContext};
use crate::error::Result;
use crate::structure::{NodeRef, StructureHandler};

/// Form fields need an accessible name (ISO 14289-1 Section 7.18.4).
pub struct FormChecker<'a> {
    context: &'a ValidationContext<'a>,
}

impl<'a> FormChecker<'a> {
    /// Create the checker.
    pub fn new(context: &'a ValidationContext<'a>) -> Self {
        Self { context }
    }
}

impl StructureHandler for FormChecker<'_> {
    fn name(&self) -> &'static str {
        "FormChecker"
    }

    fn accept(&self, node: NodeRef<'_>) -> bool {
        self.context.has_role(node, "Form")
    }

    fn process(&mut self, node: NodeRef<'_>) -> Result<()> {
        for obj_ref in node.children().filter_map(|c| c.as_obj_ref()) {
            let Some(annotation) = self.context.annotation_for(obj_ref)? else {
                continue;
            };
            let named = annotation
                .alternate_name
                .as_deref()
                .is_some_and(|name| !name.trim().is_empty());
            if annotation.subtype == AnnotationSubtype::Widget && !named {
                return Err(ConformanceViolation::FormFieldMissingName { page: obj_ref.page }.into());
            }
        }
        Ok(())
    }
}
