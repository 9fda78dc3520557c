//! PDF/UA conformance violations.
//!
//! Every checker reports through [`ConformanceViolation`]. Messages are meant
//! for document authors: table positions are given per section, the way
//! authoring tools number rows.

use crate::structure::TableSection;
use serde::Serialize;
use std::fmt;

/// Position of a table cell as an author sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellLocation {
    /// Row within `section`, from 0
    pub row: usize,
    /// Column, from 0
    pub col: usize,
    /// Section the row belongs to
    pub section: TableSection,
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row: {}, Column: {}, Section: {}", self.row, self.col, self.section)
    }
}

fn cell_lines(cells: &[CellLocation]) -> String {
    cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn heading_name(level: &u8) -> String {
    if *level == 0 {
        "the start of the document".to_string()
    } else {
        format!("H{}", level)
    }
}

/// A PDF/UA rule the document breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ConformanceViolation {
    // Document-level
    /// Document is not marked as tagged
    #[error("Document must be a Tagged PDF (MarkInfo/Marked = true)")]
    NotTaggedPdf,

    /// Document has no structure tree
    #[error("Document must have a structure tree (StructTreeRoot)")]
    MissingStructTreeRoot,

    /// Catalog has no `/Lang`
    #[error("Document must specify a primary language (/Lang in catalog)")]
    MissingLanguage,

    /// Document has no title
    #[error("Document must have a title in document info or XMP metadata")]
    MissingTitle,

    /// DisplayDocTitle is not set
    #[error("ViewerPreferences/DisplayDocTitle must be true")]
    TitleNotDisplayed,

    // Role maps and structure types
    /// A namespace role map leads back into the namespace it started from
    #[error("Role '{role}' in namespace '{namespace}' is mapped back into the same namespace")]
    RoleMappedToSelfNamespace {
        /// Mapped role
        role: String,
        /// Namespace name
        namespace: String,
    },

    /// A standard structure type appears as a role map key
    #[error("Standard structure type '{role}' must not be remapped")]
    StandardRoleRemapped {
        /// Remapped role
        role: String,
    },

    /// An element's role does not resolve to a standard structure type
    #[error("Structure type '{role}' does not map to a standard structure type (resolved to '{resolved}')")]
    NonStandardRole {
        /// Role as written
        role: String,
        /// Role after role map resolution
        resolved: String,
    },

    // Tables
    /// A table cell is neither TH nor TD
    #[error("Table cell at row {row} ({section}), column {col} must be TH or TD, found '{role}'")]
    InvalidCellRole {
        /// Row within the section
        row: usize,
        /// Column
        col: usize,
        /// Section
        section: TableSection,
        /// Resolved role of the cell
        role: String,
    },

    /// A table slot is not covered by any cell
    #[error("Table is malformed: no cell covers row {row} ({section}), column {col}")]
    EmptyTableCell {
        /// Row within the section
        row: usize,
        /// Column
        col: usize,
        /// Section
        section: TableSection,
    },

    /// Data cells without a determinable header
    #[error("Cannot determine the header cell for the following table cells:\n{}", cell_lines(.cells))]
    UndeterminableCellHeader {
        /// Every offending cell, in row-major order
        cells: Vec<CellLocation>,
    },

    // Lists
    /// A list item contains something other than Lbl, LBody or Artifact
    #[error("List item content must be tagged Lbl or LBody, found '{role}'")]
    InvalidListItemContent {
        /// Offending role
        role: String,
    },

    /// A list uses labels but declares no numbering
    #[error("List with Lbl elements must declare a ListNumbering attribute other than None")]
    ListLabelWithoutNumbering,

    // Notes
    /// A Note element without `/ID`
    #[error("Note structure element must have an ID entry")]
    NoteWithoutId,

    /// An FENote with a NoteType other than Footnote, Endnote or None
    #[error("FENote NoteType must be Footnote, Endnote or None, found '{value}'")]
    InvalidNoteType {
        /// NoteType value
        value: String,
    },

    /// An FENote and its citing content do not reference each other
    #[error("FENote {note} and the content that cites it must reference each other")]
    InvalidNoteReference {
        /// Note element id, or node id when it has none
        note: String,
    },

    // Headings
    /// Both H and H1..H6 in one document
    #[error("Document must not mix H and numbered heading (H1-H6) structure types")]
    MixedHeadingTypes,

    /// A numbered heading skips a level
    #[error("Heading H{found} skips a level after {}", heading_name(.previous))]
    HeadingLevelSkipped {
        /// Previous heading level (0 = no heading yet)
        previous: u8,
        /// Level found
        found: u8,
    },

    // Links and annotations
    /// A Link element without an annotation reference
    #[error("Link structure element must contain a link annotation object reference")]
    LinkWithoutAnnotation,

    /// A link annotation outside a Link element
    #[error("Link annotation on page {page} must be nested in a Link structure element")]
    LinkAnnotationNotInLink {
        /// Page index
        page: usize,
    },

    /// A widget annotation outside a Form element
    #[error("Widget annotation on page {page} must be nested in a Form structure element")]
    WidgetNotInForm {
        /// Page index
        page: usize,
    },

    /// An annotation without an alternate description
    #[error("{subtype} annotation on page {page} must have a Contents entry")]
    AnnotationMissingContents {
        /// Page index
        page: usize,
        /// Annotation subtype name
        subtype: String,
    },

    /// An annotation that no structure element references
    #[error("{subtype} annotation {index} on page {page} is not part of the structure tree")]
    AnnotationNotTagged {
        /// Page index
        page: usize,
        /// Index in the page's annotation array
        index: usize,
        /// Annotation subtype name
        subtype: String,
    },

    // Forms
    /// A form field without an accessible name
    #[error("Form field widget on page {page} must have an alternate name (TU)")]
    FormFieldMissingName {
        /// Page index
        page: usize,
    },

    // Fonts
    /// A font program is not embedded
    #[error("Font '{font}' must be embedded")]
    FontNotEmbedded {
        /// Font name
        font: String,
    },

    /// A font has no Unicode mapping
    #[error("Font '{font}' must map every glyph to Unicode")]
    MissingUnicodeMapping {
        /// Font name
        font: String,
    },
}

impl ConformanceViolation {
    /// Stable code for this kind of violation.
    pub fn code(&self) -> &'static str {
        match self {
            // Document-level
            ConformanceViolation::NotTaggedPdf => "UA-DOC-001",
            ConformanceViolation::MissingLanguage => "UA-DOC-002",
            ConformanceViolation::MissingTitle => "UA-DOC-003",
            ConformanceViolation::TitleNotDisplayed => "UA-DOC-004",
            ConformanceViolation::MissingStructTreeRoot => "UA-DOC-007",

            // Structure
            ConformanceViolation::NonStandardRole { .. } => "UA-STRUCT-002",
            ConformanceViolation::HeadingLevelSkipped { .. } => "UA-STRUCT-005",
            ConformanceViolation::RoleMappedToSelfNamespace { .. } => "UA-STRUCT-006",
            ConformanceViolation::StandardRoleRemapped { .. } => "UA-STRUCT-007",
            ConformanceViolation::MixedHeadingTypes => "UA-STRUCT-008",

            // Table
            ConformanceViolation::InvalidCellRole { .. } => "UA-TBL-002",
            ConformanceViolation::UndeterminableCellHeader { .. } => "UA-TBL-004",
            ConformanceViolation::EmptyTableCell { .. } => "UA-TBL-007",

            // List
            ConformanceViolation::InvalidListItemContent { .. } => "UA-LIST-001",
            ConformanceViolation::ListLabelWithoutNumbering => "UA-LIST-003",

            // Note
            ConformanceViolation::NoteWithoutId => "UA-NOTE-001",
            ConformanceViolation::InvalidNoteType { .. } => "UA-NOTE-002",
            ConformanceViolation::InvalidNoteReference { .. } => "UA-NOTE-003",

            // Link
            ConformanceViolation::LinkWithoutAnnotation => "UA-LINK-003",
            ConformanceViolation::LinkAnnotationNotInLink { .. } => "UA-LINK-004",

            // Annotation
            ConformanceViolation::AnnotationNotTagged { .. } => "UA-ANNOT-001",
            ConformanceViolation::AnnotationMissingContents { .. } => "UA-ANNOT-002",
            ConformanceViolation::WidgetNotInForm { .. } => "UA-ANNOT-003",

            // Form
            ConformanceViolation::FormFieldMissingName { .. } => "UA-FORM-001",

            // Font/Text
            ConformanceViolation::FontNotEmbedded { .. } => "UA-TEXT-001",
            ConformanceViolation::MissingUnicodeMapping { .. } => "UA-TEXT-002",
        }
    }
}
