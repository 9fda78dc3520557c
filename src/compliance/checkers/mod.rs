//! Rule handlers run during structure tree traversal.
//!
//! Each checker encodes one family of PDF/UA rules and reports the first
//! offending node, except [`TableChecker`], which reports every data cell of
//! a table without a header at once.

mod annotation;
mod form;
mod heading;
mod link;
mod list;
mod note;
mod structure_type;
mod table;

pub use annotation::AnnotationChecker;
pub use form::FormChecker;
pub use heading::HeadingChecker;
pub use link::LinkChecker;
pub use list::ListChecker;
pub use note::NoteChecker;
pub use structure_type::StructureTypeChecker;
pub use table::TableChecker;
