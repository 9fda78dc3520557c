//! PDF/UA compliance types and data structures.

use super::violation::ConformanceViolation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// PDF/UA conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdfUaLevel {
    /// PDF/UA-1 (ISO 14289-1:2014)
    Ua1,
    /// PDF/UA-2 (ISO 14289-2:2024, based on PDF 2.0)
    Ua2,
}

impl fmt::Display for PdfUaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfUaLevel::Ua1 => write!(f, "PDF/UA-1"),
            PdfUaLevel::Ua2 => write!(f, "PDF/UA-2"),
        }
    }
}

impl PdfUaLevel {
    /// Get the XMP pdfuaid:part value.
    pub fn xmp_part(&self) -> &'static str {
        match self {
            PdfUaLevel::Ua1 => "1",
            PdfUaLevel::Ua2 => "2",
        }
    }

    /// Parse from the XMP pdfuaid:part value.
    pub fn from_xmp(part: &str) -> Option<Self> {
        match part.trim() {
            "1" => Some(PdfUaLevel::Ua1),
            "2" => Some(PdfUaLevel::Ua2),
            _ => None,
        }
    }

    /// Whether header cells without a `Scope` get a position-based default.
    pub fn assumes_default_header_scope(&self) -> bool {
        matches!(self, PdfUaLevel::Ua2)
    }
}

/// Result of PDF/UA validation.
#[derive(Debug, Clone, Serialize)]
pub struct UaValidationResult {
    /// Whether the document is compliant with the target level.
    pub is_compliant: bool,
    /// The level validated against.
    pub level: PdfUaLevel,
    /// The violation that stopped validation, if any.
    pub violation: Option<ConformanceViolation>,
    /// Non-fatal findings.
    pub warnings: Vec<ComplianceWarning>,
    /// Summary statistics.
    pub stats: UaValidationStats,
}

impl UaValidationResult {
    /// Create a new, compliant result for a specific level.
    pub fn new(level: PdfUaLevel) -> Self {
        Self {
            is_compliant: true,
            level,
            violation: None,
            warnings: Vec::new(),
            stats: UaValidationStats::default(),
        }
    }

    /// Record the violation that stopped validation.
    pub fn set_violation(&mut self, violation: ConformanceViolation) {
        self.violation = Some(violation);
        self.is_compliant = false;
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: ComplianceWarning) {
        self.warnings.push(warning);
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Serialize the result as pretty-printed JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// PDF/UA validation statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UaValidationStats {
    /// Number of structure tree nodes visited.
    pub structure_elements_checked: usize,
    /// Number of tables checked.
    pub tables_checked: usize,
    /// Number of annotations checked.
    pub annotations_checked: usize,
    /// Number of fonts checked.
    pub fonts_checked: usize,
}

/// Compliance warning (non-fatal issue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceWarning {
    /// Warning code.
    pub code: WarningCode,
    /// Human-readable message.
    pub message: String,
    /// Location in the document (if applicable).
    pub location: Option<String>,
}

impl ComplianceWarning {
    /// Create a new compliance warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ComplianceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref loc) = self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

/// Warning codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WarningCode {
    /// Role resolution stopped at the hop limit
    RoleResolutionLimit,
    /// Language tag does not look like BCP 47
    InvalidLanguageTag,
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            WarningCode::RoleResolutionLimit => "WARN-101",
            WarningCode::InvalidLanguageTag => "WARN-102",
        };
        write!(f, "{}", code)
    }
}
