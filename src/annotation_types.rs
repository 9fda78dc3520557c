//! Core annotation types and enums per PDF spec ISO 32000-1:2008, Section 12.5.

use bitflags::bitflags;

/// Annotation subtype per PDF spec Table 169.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationSubtype {
    /// Text annotation (sticky note) - Section 12.5.6.4
    Text,
    /// Link annotation - Section 12.5.6.5
    Link,
    /// Free text annotation - Section 12.5.6.6
    FreeText,
    /// Line annotation - Section 12.5.6.7
    Line,
    /// Square annotation - Section 12.5.6.8
    Square,
    /// Circle annotation - Section 12.5.6.8
    Circle,
    /// Highlight annotation - Section 12.5.6.10
    Highlight,
    /// Rubber stamp annotation - Section 12.5.6.12
    Stamp,
    /// Ink annotation - Section 12.5.6.13
    Ink,
    /// Popup annotation - Section 12.5.6.14
    Popup,
    /// File attachment annotation - Section 12.5.6.15
    FileAttachment,
    /// Widget annotation (form field) - Section 12.5.6.19
    Widget,
    /// Screen annotation - Section 12.5.6.18
    Screen,
    /// Printer's mark annotation - Section 12.5.6.20
    PrinterMark,
    /// Trap network annotation - Section 12.5.6.21
    TrapNet,
    /// Watermark annotation - Section 12.5.6.22
    Watermark,
    /// Redaction annotation - Section 12.5.6.23
    Redact,
    /// Any subtype not listed above
    Unknown,
}

impl AnnotationSubtype {
    /// Get the PDF name for this annotation subtype.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Link => "Link",
            Self::FreeText => "FreeText",
            Self::Line => "Line",
            Self::Square => "Square",
            Self::Circle => "Circle",
            Self::Highlight => "Highlight",
            Self::Stamp => "Stamp",
            Self::Ink => "Ink",
            Self::Popup => "Popup",
            Self::FileAttachment => "FileAttachment",
            Self::Widget => "Widget",
            Self::Screen => "Screen",
            Self::PrinterMark => "PrinterMark",
            Self::TrapNet => "TrapNet",
            Self::Watermark => "Watermark",
            Self::Redact => "Redact",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse from PDF name.
    pub fn from_pdf_name(name: &str) -> Self {
        match name {
            "Text" => Self::Text,
            "Link" => Self::Link,
            "FreeText" => Self::FreeText,
            "Line" => Self::Line,
            "Square" => Self::Square,
            "Circle" => Self::Circle,
            "Highlight" => Self::Highlight,
            "Stamp" => Self::Stamp,
            "Ink" => Self::Ink,
            "Popup" => Self::Popup,
            "FileAttachment" => Self::FileAttachment,
            "Widget" => Self::Widget,
            "Screen" => Self::Screen,
            "PrinterMark" => Self::PrinterMark,
            "TrapNet" => Self::TrapNet,
            "Watermark" => Self::Watermark,
            "Redact" => Self::Redact,
            _ => Self::Unknown,
        }
    }

    /// Whether PDF/UA requires the annotation to be in the structure tree.
    ///
    /// Popups belong to their parent annotation; printer's marks and trap
    /// networks are never part of the real content.
    pub fn requires_tagging(&self) -> bool {
        !matches!(self, Self::Popup | Self::PrinterMark | Self::TrapNet)
    }

    /// Whether PDF/UA requires a `/Contents` alternate description.
    ///
    /// Widgets are described by their field's TU entry instead.
    pub fn requires_contents(&self) -> bool {
        self.requires_tagging() && !matches!(self, Self::Widget)
    }
}

bitflags! {
    /// Annotation flags per PDF spec Table 165 that take an annotation off screen.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AnnotationFlags: u32 {
        /// Do not display or print
        const HIDDEN = 1 << 1;
        /// Do not display on screen
        const NO_VIEW = 1 << 5;
    }
}
