//! PDF/UA structure tree validation.
//!
//! This module checks the logical structure of a tagged document against
//! PDF/UA (accessibility) requirements.
//!
//! ## PDF/UA Conformance Levels
//!
//! - **PDF/UA-1**: ISO 14289-1:2014, based on PDF 1.7
//! - **PDF/UA-2**: ISO 14289-2:2024, based on PDF 2.0. Adds namespaces,
//!   `FENote` and assumed scopes for header cells without a `Scope`
//!
//! ## What is checked
//!
//! - Document must be a Tagged PDF with a structure tree
//! - Language and title must be specified
//! - Role maps must not remap standard types or map back into their own namespace
//! - Every element must resolve to a standard structure type
//! - Tables must be regular and every data cell must have a header
//! - Lists, notes, headings, links, annotations and form fields follow their rules
//! - Fonts must be embedded and map to Unicode
//!
//! ## Example
//!
//! ```
//! use pdf_ua_structure::compliance::{validate_pdf_ua, PdfUaLevel};
//! use pdf_ua_structure::document::{DocumentInfo, TaggedDocument};
//! use pdf_ua_structure::structure::{StructElem, StructTreeBuilder};
//!
//! let mut builder = StructTreeBuilder::new();
//! let root = builder.root();
//! let body = builder.add_elem(root, StructElem::new("Document"))?;
//! builder.add_elem(body, StructElem::new("H1"))?;
//!
//! let document = TaggedDocument::new(DocumentInfo::accessible("en", "Annual report"), builder.build());
//! let result = validate_pdf_ua(&document, PdfUaLevel::Ua1)?;
//! if result.is_compliant {
//!     println!("Document is PDF/UA-1 compliant");
//! }
//! # Ok::<(), pdf_ua_structure::error::Error>(())
//! ```
//!
//! ## Standards Reference
//!
//! - ISO 14289-1:2014 (PDF/UA-1)
//! - ISO 14289-2:2024 (PDF/UA-2)
//! - ISO 32000-1:2008 Section 14.8 (Tagged PDF)

pub mod checkers;
mod context;
mod pdf_ua;
mod role_resolver;
mod table_matrix;
mod types;
mod violation;

pub use context::ValidationContext;
pub use pdf_ua::{validate_pdf_ua, HandlerFactory, PdfUaValidator, ValidationTarget};
pub use role_resolver::{ResolvedRole, RoleResolver};
pub use table_matrix::TableResultMatrix;
pub use types::{ComplianceWarning, PdfUaLevel, UaValidationResult, UaValidationStats, WarningCode};
pub use violation::{CellLocation, ConformanceViolation};
