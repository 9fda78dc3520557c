//! Standard structure type vocabularies.
//!
//! PDF 1.7 types are listed in ISO 32000-1:2008 Section 14.8.4, PDF 2.0 types
//! in ISO 32000-2:2020 Section 14.8.4. Namespace names are the ones defined in
//! ISO 32000-2:2020 Section 14.7.4.2.

use phf::phf_set;

/// Namespace name of the PDF 1.7 standard structure types.
pub const PDF_1_7_NAMESPACE: &str = "http://iso.org/pdf/ssn";

/// Namespace name of the PDF 2.0 standard structure types.
pub const PDF_2_0_NAMESPACE: &str = "http://iso.org/pdf2/ssn";

/// Namespace name of MathML 3.0.
pub const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

static PDF_1_7_TYPES: phf::Set<&'static str> = phf_set! {
    "Document", "Part", "Art", "Sect", "Div", "BlockQuote", "Caption", "TOC", "TOCI",
    "Index", "NonStruct", "Private",
    "P", "H", "H1", "H2", "H3", "H4", "H5", "H6",
    "L", "LI", "Lbl", "LBody",
    "Table", "TR", "TH", "TD", "THead", "TBody", "TFoot",
    "Span", "Quote", "Note", "Reference", "BibEntry", "Code", "Link", "Annot",
    "Ruby", "RB", "RT", "RP", "Warichu", "WT", "WP",
    "Figure", "Formula", "Form",
};

static PDF_2_0_TYPES: phf::Set<&'static str> = phf_set! {
    "Document", "DocumentFragment", "Part", "Sect", "Div", "Aside", "NonStruct",
    "P", "H", "H1", "H2", "H3", "H4", "H5", "H6", "Title", "FENote",
    "Sub", "Lbl", "Span", "Em", "Strong", "Link", "Annot", "Form",
    "Ruby", "RB", "RT", "RP", "Warichu", "WT", "WP",
    "L", "LI", "LBody",
    "Table", "TR", "TH", "TD", "THead", "TBody", "TFoot",
    "Caption", "Figure", "Formula", "Artifact",
};

/// Check if `role` is a PDF 1.7 standard structure type.
pub fn is_pdf_1_7_standard(role: &str) -> bool {
    PDF_1_7_TYPES.contains(role)
}

/// Check if `role` is a PDF 2.0 standard structure type.
pub fn is_pdf_2_0_standard(role: &str) -> bool {
    PDF_2_0_TYPES.contains(role)
}

/// Check if a namespace name is one of the standard structure namespaces.
pub fn is_standard_namespace(name: &str) -> bool {
    matches!(name, PDF_1_7_NAMESPACE | PDF_2_0_NAMESPACE | MATHML_NAMESPACE)
}

/// Heading level for `H1`..`H6` (`None` for `H` and everything else).
pub fn heading_level(role: &str) -> Option<u8> {
    match role {
        "H1" => Some(1),
        "H2" => Some(2),
        "H3" => Some(3),
        "H4" => Some(4),
        "H5" => Some(5),
        "H6" => Some(6),
        _ => None,
    }
}
