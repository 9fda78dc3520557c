use crate::annotation_types::AnnotationSubtype;
use crate::compliance::{ConformanceViolation, ValidationContext};
use crate::error::Result;
use crate::structure::{NodeRef, ObjRefTarget, StructureHandler};

/// Placement and alternate descriptions of tagged annotations
/// (ISO 14289-1 Section 7.18).
pub struct AnnotationChecker<'a> {
    context: &'a ValidationContext<'a>,
}

impl<'a> AnnotationChecker<'a> {
    /// Create the checker.
    pub fn new(context: &'a ValidationContext<'a>) -> Self {
        Self { context }
    }
}

impl StructureHandler for AnnotationChecker<'_> {
    fn name(&self) -> &'static str {
        "AnnotationChecker"
    }

    fn accept(&self, node: NodeRef<'_>) -> bool {
        matches!(
            node.as_obj_ref().map(|r| r.target),
            Some(ObjRefTarget::Annotation { .. })
        )
    }

    fn process(&mut self, node: NodeRef<'_>) -> Result<()> {
        let Some(obj_ref) = node.as_obj_ref() else {
            return Ok(());
        };
        let Some(annotation) = self.context.annotation_for(obj_ref)? else {
            return Ok(());
        };
        self.context.record(|stats| stats.annotations_checked += 1);

        let parent_role = node.parent().and_then(|p| self.context.resolve_role(p));
        let page = obj_ref.page;
        match annotation.subtype {
            AnnotationSubtype::Link if parent_role.as_deref() != Some("Link") => {
                return Err(ConformanceViolation::LinkAnnotationNotInLink { page }.into());
            },
            AnnotationSubtype::Widget if parent_role.as_deref() != Some("Form") => {
                return Err(ConformanceViolation::WidgetNotInForm { page }.into());
            },
            _ => {},
        }

        if annotation.subtype.requires_contents() && !annotation.has_contents() {
            return Err(ConformanceViolation::AnnotationMissingContents {
                page,
                subtype: annotation.subtype.pdf_name().to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::checkers::test_support::{document, run};
    use crate::compliance::PdfUaLevel;
    use crate::document::{Annotation, PageInfo, TaggedDocument};
    use crate::error::Error;
    use crate::structure::{StructElem, StructTreeBuilder};

    fn single(parent_role: &str, annotation: Annotation) -> TaggedDocument {
        let mut b = StructTreeBuilder::new();
        let root = b.root();
        let parent = b.add_elem(root, StructElem::new(parent_role)).unwrap();
        b.add_annotation_ref(parent, 0, 0).unwrap();
        document(b.build()).with_page(PageInfo {
            annotations: vec![annotation],
        })
    }

    fn check(doc: &TaggedDocument) -> Result<()> {
        run(doc, PdfUaLevel::Ua1, |c| Box::new(AnnotationChecker::new(c)))
    }

    #[test]
    fn test_described_link_in_link() {
        let doc = single(
            "Link",
            Annotation::new(AnnotationSubtype::Link).with_contents("Go to chapter 2"),
        );
        assert!(check(&doc).is_ok());
    }

    #[test]
    fn test_link_annotation_outside_link() {
        let doc = single(
            "P",
            Annotation::new(AnnotationSubtype::Link).with_contents("Go to chapter 2"),
        );
        assert!(matches!(
            check(&doc),
            Err(Error::Conformance(ConformanceViolation::LinkAnnotationNotInLink { page: 0 }))
        ));
    }

    #[test]
    fn test_widget_outside_form() {
        let doc = single("Figure", Annotation::new(AnnotationSubtype::Widget));
        assert!(matches!(
            check(&doc),
            Err(Error::Conformance(ConformanceViolation::WidgetNotInForm { page: 0 }))
        ));
    }

    #[test]
    fn test_blank_contents() {
        let doc = single(
            "Annot",
            Annotation::new(AnnotationSubtype::Text).with_contents("   "),
        );
        assert!(matches!(
            check(&doc),
            Err(Error::Conformance(ConformanceViolation::AnnotationMissingContents { ref subtype, .. })) if subtype == "Text"
        ));
    }

    #[test]
    fn test_reference_to_missing_annotation() {
        let mut b = StructTreeBuilder::new();
        let root = b.root();
        let link = b.add_elem(root, StructElem::new("Link")).unwrap();
        b.add_annotation_ref(link, 2, 0).unwrap();
        let doc = document(b.build());
        assert!(matches!(check(&doc), Err(Error::InvalidStructure(_))));
    }
}
