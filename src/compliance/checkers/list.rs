use crate::compliance::{ConformanceViolation, ValidationContext};
use crate::error::Result;
use crate::structure::{AttributeKey, AttributeOwner, NodeRef, StructureHandler};

/// List item content and list numbering (ISO 14289-1 Section 7.6).
pub struct ListChecker<'a> {
    context: &'a ValidationContext<'a>,
}

impl<'a> ListChecker<'a> {
    /// Create the checker.
    pub fn new(context: &'a ValidationContext<'a>) -> Self {
        Self { context }
    }

    fn has_numbering(node: NodeRef<'_>) -> bool {
        node.as_elem()
            .and_then(|elem| elem.attribute(&AttributeKey::ListNumbering, Some(&AttributeOwner::List)))
            .and_then(|value| value.as_str())
            .is_some_and(|numbering| numbering != "None")
    }
}

impl StructureHandler for ListChecker<'_> {
    fn name(&self) -> &'static str {
        "ListChecker"
    }

    fn accept(&self, node: NodeRef<'_>) -> bool {
        self.context.has_role(node, "L")
    }

    fn process(&mut self, node: NodeRef<'_>) -> Result<()> {
        let mut has_label = false;

        for item in node.children().filter(|c| self.context.has_role(*c, "LI")) {
            for content in item.children().filter(|c| c.as_elem().is_some()) {
                match self.context.resolve_role(content).as_deref() {
                    Some("Lbl") => has_label = true,
                    Some("LBody") | Some("Artifact") => {},
                    other => {
                        return Err(ConformanceViolation::InvalidListItemContent {
                            role: other.unwrap_or_default().to_string(),
                        }
                        .into());
                    },
                }
            }
        }

        if has_label && !Self::has_numbering(node) {
            return Err(ConformanceViolation::ListLabelWithoutNumbering.into());
        }
        Ok(())
    }
}
