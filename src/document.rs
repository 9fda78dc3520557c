//! The tagged document as seen by the validator.
//!
//! Parsing and object resolution happen elsewhere; this is the already-loaded
//! view: catalog facts, the structure tree, page annotations and fonts.

use crate::annotation_types::{AnnotationFlags, AnnotationSubtype};
use crate::structure::StructTree;

/// Catalog and metadata facts relevant to PDF/UA.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    /// `/MarkInfo /Marked true`
    pub marked: bool,
    /// Catalog `/Lang`
    pub language: Option<String>,
    /// Title from the info dictionary or XMP `dc:title`
    pub title: Option<String>,
    /// `/ViewerPreferences /DisplayDocTitle true`
    pub display_doc_title: bool,
}

impl DocumentInfo {
    /// Info for a document that satisfies all catalog-level requirements.
    pub fn accessible(language: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            marked: true,
            language: Some(language.into()),
            title: Some(title.into()),
            display_doc_title: true,
        }
    }
}

/// An annotation on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// `/Subtype`
    pub subtype: AnnotationSubtype,
    /// `/F`
    pub flags: AnnotationFlags,
    /// `/Contents`
    pub contents: Option<String>,
    /// Field alternate name (`/TU`), for widgets
    pub alternate_name: Option<String>,
}

impl Annotation {
    /// Create an annotation of a subtype with no flags and no text.
    pub fn new(subtype: AnnotationSubtype) -> Self {
        Self {
            subtype,
            flags: AnnotationFlags::empty(),
            contents: None,
            alternate_name: None,
        }
    }

    /// Set `/Contents`.
    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    /// Set the field alternate name.
    pub fn with_alternate_name(mut self, name: impl Into<String>) -> Self {
        self.alternate_name = Some(name.into());
        self
    }

    /// Set `/F`.
    pub fn with_flags(mut self, flags: AnnotationFlags) -> Self {
        self.flags = flags;
        self
    }

    /// True if `/Contents` is present and not blank.
    pub fn has_contents(&self) -> bool {
        self.contents.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

/// Annotations of one page, in `/Annots` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Annotations
    pub annotations: Vec<Annotation>,
}

/// A font used by the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontInfo {
    /// `/BaseFont`
    pub name: String,
    /// Font program embedded
    pub embedded: bool,
    /// ToUnicode CMap or a standard encoding mapping every used code
    pub has_unicode_map: bool,
}

/// Document handed to the validator.
#[derive(Debug, Clone, Default)]
pub struct TaggedDocument {
    /// Catalog facts
    pub info: DocumentInfo,
    /// Structure tree, if the document has a StructTreeRoot
    pub structure: Option<StructTree>,
    /// Pages in order
    pub pages: Vec<PageInfo>,
    /// Fonts
    pub fonts: Vec<FontInfo>,
}

impl TaggedDocument {
    /// Create a document from catalog info and a structure tree.
    pub fn new(info: DocumentInfo, structure: StructTree) -> Self {
        Self {
            info,
            structure: Some(structure),
            pages: Vec::new(),
            fonts: Vec::new(),
        }
    }

    /// Add a page (builder style).
    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.pages.push(page);
        self
    }

    /// Annotation at `(page, index)`.
    pub fn annotation(&self, page: usize, index: usize) -> Option<&Annotation> {
        self.pages.get(page).and_then(|p| p.annotations.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_lookup() {
        let doc = TaggedDocument::default().with_page(PageInfo {
            annotations: vec![Annotation::new(AnnotationSubtype::Link)],
        });
        assert!(doc.annotation(0, 0).is_some());
        assert!(doc.annotation(0, 1).is_none());
        assert!(doc.annotation(1, 0).is_none());
    }

    #[test]
    fn test_blank_contents_do_not_count() {
        let annot = Annotation::new(AnnotationSubtype::Text).with_contents("   ");
        assert!(!annot.has_contents());
        assert!(Annotation::new(AnnotationSubtype::Text)
            .with_contents("Reviewer note")
            .has_contents());
    }
}
