use crate::compliance::{ConformanceViolation, PdfUaLevel, ValidationContext};
use crate::error::Result;
use crate::structure::{AttributeKey, NodeRef, StructureHandler};

const NOTE_TYPES: &[&str] = &["Footnote", "Endnote", "None"];

/// Note identification (PDF/UA-1) and FENote linkage (PDF/UA-2).
pub struct NoteChecker<'a> {
    context: &'a ValidationContext<'a>,
}

impl<'a> NoteChecker<'a> {
    /// Create the checker.
    pub fn new(context: &'a ValidationContext<'a>) -> Self {
        Self { context }
    }

    fn label(node: NodeRef<'_>) -> String {
        node.element_id()
            .map(str::to_string)
            .unwrap_or_else(|| node.id().to_string())
    }

    fn check_fe_note(&self, note: NodeRef<'_>) -> Result<()> {
        if let Some(value) = note
            .as_elem()
            .and_then(|elem| elem.attribute(&AttributeKey::NoteType, None))
        {
            let value = value.as_str().unwrap_or_default();
            if !NOTE_TYPES.contains(&value) {
                return Err(ConformanceViolation::InvalidNoteType {
                    value: value.to_string(),
                }
                .into());
            }
        }

        for cited_by in note.references() {
            if !cited_by.references_node(note.id()) {
                return Err(ConformanceViolation::InvalidNoteReference {
                    note: Self::label(note),
                }
                .into());
            }
        }
        Ok(())
    }

    fn check_citations(&self, node: NodeRef<'_>) -> Result<()> {
        for note in node
            .references()
            .filter(|r| self.context.has_role(*r, "FENote"))
        {
            if !note.references_node(node.id()) {
                return Err(ConformanceViolation::InvalidNoteReference {
                    note: Self::label(note),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl StructureHandler for NoteChecker<'_> {
    fn name(&self) -> &'static str {
        "NoteChecker"
    }

    fn accept(&self, node: NodeRef<'_>) -> bool {
        node.as_elem().is_some()
    }

    fn process(&mut self, node: NodeRef<'_>) -> Result<()> {
        match (self.context.level(), self.context.resolve_role(node).as_deref()) {
            (PdfUaLevel::Ua1, Some("Note")) if node.element_id().is_none() => {
                Err(ConformanceViolation::NoteWithoutId.into())
            },
            (PdfUaLevel::Ua2, Some("FENote")) => self.check_fe_note(node),
            (PdfUaLevel::Ua2, _) => self.check_citations(node),
            _ => Ok(()),
        }
    }
}
