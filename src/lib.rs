// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
#![allow(clippy::enum_variant_names)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF/UA Structure
//!
//! Accessibility validation of the logical structure of Tagged PDF documents.
//!
//! ## Core Features
//!
//! - **Role Resolution**: Namespace-aware role maps (PDF 1.7 `/RoleMap` and PDF 2.0
//!   namespaces) with a bounded hop count, so cyclic maps never hang validation
//! - **Pluggable Rules**: One document-order traversal of the structure tree
//!   dispatching to a catalog of rule handlers
//! - **Table Headers**: Determines for every data cell whether its header can be
//!   found through `Headers` ids, explicit `Scope`, or (PDF/UA-2) the assumed scope
//! - **PDF/UA-1 and PDF/UA-2**: ISO 14289-1:2014 and ISO 14289-2:2024
//!
//! ## Architecture
//!
//! - [`structure`]: the structure tree arena, its builder, the table cell
//!   iterator and the traversal engine
//! - [`compliance`]: validation context, role resolver, rule handlers and the
//!   [`PdfUaValidator`](compliance::PdfUaValidator) entry point
//! - [`document`]: catalog facts, page annotations and fonts handed to the validator
//!
//! ## Quick Start
//!
//! ```
//! use pdf_ua_structure::compliance::{PdfUaLevel, PdfUaValidator, ValidationTarget};
//! use pdf_ua_structure::config::ValidatorOptions;
//! use pdf_ua_structure::document::{DocumentInfo, TaggedDocument};
//! use pdf_ua_structure::structure::{RoleMapping, StructElem, StructTreeBuilder};
//!
//! # fn main() -> pdf_ua_structure::Result<()> {
//! let mut builder = StructTreeBuilder::new();
//! builder.map_role(None, "Chapter", RoleMapping::new("Sect"))?;
//! let root = builder.root();
//! let chapter = builder.add_elem(root, StructElem::new("Chapter"))?;
//! builder.add_elem(chapter, StructElem::new("H1"))?;
//!
//! let document = TaggedDocument::new(DocumentInfo::accessible("en-GB", "Handbook"), builder.build());
//! let validator = PdfUaValidator::new(ValidatorOptions::new(PdfUaLevel::Ua1));
//! validator.validate(&document, ValidationTarget::Document)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Input model
/// Core annotation types and enums per PDF spec
pub mod annotation_types;
pub mod document;
/// PDF logical structure (Tagged PDFs)
pub mod structure;

// PDF/UA validation
pub mod compliance;

// Configuration
pub mod config;

// Re-exports
pub use annotation_types::{AnnotationFlags, AnnotationSubtype};
pub use compliance::{validate_pdf_ua, ConformanceViolation, PdfUaLevel, PdfUaValidator};
pub use config::ValidatorOptions;
pub use document::TaggedDocument;
pub use error::{Error, Result};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
