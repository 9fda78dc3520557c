//! PDF/UA structure validation.
//!
//! Validates a tagged document against PDF/UA-1 (ISO 14289-1:2014) or
//! PDF/UA-2 (ISO 14289-2:2024). Catalog-level requirements are checked first,
//! then the role maps, then one traversal of the structure tree runs the
//! handler catalog.

use super::checkers::{
    AnnotationChecker, FormChecker, HeadingChecker, LinkChecker, ListChecker, NoteChecker,
    StructureTypeChecker, TableChecker,
};
use super::context::ValidationContext;
use super::types::{ComplianceWarning, PdfUaLevel, UaValidationResult, WarningCode};
use super::violation::ConformanceViolation;
use crate::annotation_types::AnnotationFlags;
use crate::config::ValidatorOptions;
use crate::document::{FontInfo, TaggedDocument};
use crate::error::{Error, Result};
use crate::structure::{StructureHandler, TreeIterator};

/// What a [`PdfUaValidator::validate`] call checks.
#[derive(Debug, Clone, Copy)]
pub enum ValidationTarget<'a> {
    /// Every requirement, ending with the structure tree traversal
    Document,
    /// Role map requirements of the StructTreeRoot only
    StructTreeRoot,
    /// One font
    Font(&'a FontInfo),
}

/// Builds an extra handler for one validation run.
pub type HandlerFactory =
    Box<dyn for<'c> Fn(&'c ValidationContext<'c>) -> Box<dyn StructureHandler + 'c> + Send + Sync>;

/// PDF/UA validator.
///
/// Validation stops at the first violation, except that all data cells of a
/// table without a header are reported together.
pub struct PdfUaValidator {
    options: ValidatorOptions,
    custom_handlers: Vec<HandlerFactory>,
}

impl Default for PdfUaValidator {
    fn default() -> Self {
        Self::new(ValidatorOptions::default())
    }
}

impl PdfUaValidator {
    /// Create a validator.
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            custom_handlers: Vec::new(),
        }
    }

    /// Options of this validator.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Append a handler to the catalog. Custom handlers run after the
    /// built-in ones, in registration order.
    pub fn register_handler<F>(&mut self, factory: F) -> &mut Self
    where
        F: for<'c> Fn(&'c ValidationContext<'c>) -> Box<dyn StructureHandler + 'c>
            + Send
            + Sync
            + 'static,
    {
        self.custom_handlers.push(Box::new(factory));
        self
    }

    /// Validate `target`, failing with the first violation found.
    pub fn validate(&self, document: &TaggedDocument, target: ValidationTarget<'_>) -> Result<()> {
        match target {
            ValidationTarget::Document => {
                check_catalog(document)?;
                let context = ValidationContext::new(document, self.options)?;
                self.validate_document(&context)
            },
            ValidationTarget::StructTreeRoot => {
                let context = ValidationContext::new(document, self.options)?;
                self.validate_struct_tree_root(&context)
            },
            ValidationTarget::Font(font) => Ok(validate_font(font)?),
        }
    }

    /// Validate the whole document and report the outcome.
    ///
    /// Conformance violations end up in the result. Malformed input
    /// (e.g. an object reference to an annotation that does not exist) is
    /// still returned as an error.
    pub fn check(&self, document: &TaggedDocument) -> Result<UaValidationResult> {
        let mut result = UaValidationResult::new(self.options.level);
        if let Err(violation) = check_catalog(document) {
            result.set_violation(violation);
            return Ok(result);
        }

        let context = ValidationContext::new(document, self.options)?;
        let outcome = self.validate_document(&context);
        for warning in context.take_warnings() {
            result.add_warning(warning);
        }
        result.stats = context.stats();

        match outcome {
            Ok(()) => {},
            Err(Error::Conformance(violation)) => result.set_violation(violation),
            Err(e) => return Err(e),
        }
        Ok(result)
    }

    fn validate_document<'c>(&self, context: &'c ValidationContext<'c>) -> Result<()> {
        let info = &context.document().info;

        match info.language.as_deref().map(str::trim) {
            None | Some("") => return Err(ConformanceViolation::MissingLanguage.into()),
            Some(lang) if !is_valid_language_tag(lang) => {
                log::debug!("Document language '{}' is not a BCP 47 tag", lang);
                context.add_warning(
                    ComplianceWarning::new(
                        WarningCode::InvalidLanguageTag,
                        format!("Language tag '{}' may not be valid BCP 47", lang),
                    )
                    .with_location("Catalog /Lang"),
                );
            },
            Some(_) => {},
        }

        if info.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(ConformanceViolation::MissingTitle.into());
        }
        if !info.display_doc_title {
            return Err(ConformanceViolation::TitleNotDisplayed.into());
        }

        self.validate_struct_tree_root(context)?;

        if self.options.check_annotations {
            check_annotations_tagged(context)?;
        }

        let mut iterator = TreeIterator::new();
        self.register_catalog(context, &mut iterator);
        let traversal = iterator.traverse_tree(context.tree());
        let visited = iterator.visited();
        context.record(|stats| stats.structure_elements_checked = visited);
        traversal?;

        for font in &context.document().fonts {
            context.record(|stats| stats.fonts_checked += 1);
            validate_font(font)?;
        }
        Ok(())
    }

    fn validate_struct_tree_root(&self, context: &ValidationContext<'_>) -> Result<()> {
        if context.level() == PdfUaLevel::Ua1 {
            context.resolver().check_no_standard_remapping()?;
        }
        context.resolver().check_no_self_namespace_mapping()?;
        Ok(())
    }

    fn register_catalog<'c>(&self, context: &'c ValidationContext<'c>, iterator: &mut TreeIterator<'c>) {
        iterator
            .add_handler(Box::new(StructureTypeChecker::new(context)))
            .add_handler(Box::new(TableChecker::new(context)))
            .add_handler(Box::new(ListChecker::new(context)))
            .add_handler(Box::new(NoteChecker::new(context)));
        if self.options.check_heading_sequence {
            iterator.add_handler(Box::new(HeadingChecker::new(context)));
        }
        iterator.add_handler(Box::new(LinkChecker::new(context)));
        if self.options.check_annotations {
            iterator.add_handler(Box::new(AnnotationChecker::new(context)));
        }
        iterator.add_handler(Box::new(FormChecker::new(context)));

        for factory in &self.custom_handlers {
            iterator.add_handler(factory(context));
        }
        log::debug!("Registered {} structure handlers", iterator.handler_count());
    }
}

/// Marked flag and StructTreeRoot presence.
fn check_catalog(document: &TaggedDocument) -> std::result::Result<(), ConformanceViolation> {
    if !document.info.marked {
        return Err(ConformanceViolation::NotTaggedPdf);
    }
    if document.structure.is_none() {
        return Err(ConformanceViolation::MissingStructTreeRoot);
    }
    Ok(())
}

/// Every annotation shown on screen that is not an artifact by definition
/// must be reachable from the structure tree.
fn check_annotations_tagged(context: &ValidationContext<'_>) -> Result<()> {
    for (page, info) in context.document().pages.iter().enumerate() {
        for (index, annotation) in info.annotations.iter().enumerate() {
            if annotation
                .flags
                .intersects(AnnotationFlags::HIDDEN | AnnotationFlags::NO_VIEW)
                || !annotation.subtype.requires_tagging()
            {
                continue;
            }
            if context.find_obj_ref(page, index).is_none() {
                return Err(ConformanceViolation::AnnotationNotTagged {
                    page,
                    index,
                    subtype: annotation.subtype.pdf_name().to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

fn validate_font(font: &FontInfo) -> std::result::Result<(), ConformanceViolation> {
    if !font.embedded {
        return Err(ConformanceViolation::FontNotEmbedded {
            font: font.name.clone(),
        });
    }
    if !font.has_unicode_map {
        return Err(ConformanceViolation::MissingUnicodeMapping {
            font: font.name.clone(),
        });
    }
    Ok(())
}

/// Check if a language tag is valid (basic BCP 47 check).
fn is_valid_language_tag(tag: &str) -> bool {
    let mut parts = tag.split('-');
    let Some(primary) = parts.next() else {
        return false;
    };

    // Primary language subtag should be 2-3 letters
    if primary.len() < 2 || primary.len() > 3 || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    parts.all(|sub| !sub.is_empty() && sub.len() <= 8 && sub.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Convenience function to validate a document against a PDF/UA level.
pub fn validate_pdf_ua(document: &TaggedDocument, level: PdfUaLevel) -> Result<UaValidationResult> {
    PdfUaValidator::new(ValidatorOptions::new(level)).check(document)
}
