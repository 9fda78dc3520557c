use crate::compliance::{ConformanceViolation, ValidationContext};
use crate::error::Result;
use crate::structure::{roles, NodeRef, StructureHandler};

/// Heading nesting (ISO 14289-1 Section 7.4).
///
/// Keeps the last numbered level seen, so it must see headings in document
/// order within a single traversal.
pub struct HeadingChecker<'a> {
    context: &'a ValidationContext<'a>,
    previous_level: u8,
    seen_generic: bool,
    seen_numbered: bool,
}

impl<'a> HeadingChecker<'a> {
    /// Create the checker.
    pub fn new(context: &'a ValidationContext<'a>) -> Self {
        Self {
            context,
            previous_level: 0,
            seen_generic: false,
            seen_numbered: false,
        }
    }
}

impl StructureHandler for HeadingChecker<'_> {
    fn name(&self) -> &'static str {
        "HeadingChecker"
    }

    fn accept(&self, node: NodeRef<'_>) -> bool {
        self.context
            .resolve_role(node)
            .is_some_and(|role| role == "H" || roles::heading_level(&role).is_some())
    }

    fn process(&mut self, node: NodeRef<'_>) -> Result<()> {
        let role = self.context.resolve_role(node).unwrap_or_default();
        match roles::heading_level(&role) {
            None => {
                self.seen_generic = true;
                if self.seen_numbered {
                    return Err(ConformanceViolation::MixedHeadingTypes.into());
                }
            },
            Some(level) => {
                self.seen_numbered = true;
                if self.seen_generic {
                    return Err(ConformanceViolation::MixedHeadingTypes.into());
                }
                if level > self.previous_level + 1 {
                    return Err(ConformanceViolation::HeadingLevelSkipped {
                        previous: self.previous_level,
                        found: level,
                    }
                    .into());
                }
                self.previous_level = level;
            },
        }
        Ok(())
    }
}
