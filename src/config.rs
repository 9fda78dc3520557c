//! Configuration for structure tree validation.

use crate::compliance::PdfUaLevel;
use crate::error::{Error, Result};
use serde::Deserialize;

/// Default cap on role map hops during role resolution.
pub const DEFAULT_MAX_ROLE_RESOLUTION_DEPTH: usize = 100;

/// Validator options.
///
/// # Example
///
/// ```
/// use pdf_ua_structure::compliance::PdfUaLevel;
/// use pdf_ua_structure::config::ValidatorOptions;
///
/// let options = ValidatorOptions::new(PdfUaLevel::Ua2).with_heading_sequence(false);
/// assert_eq!(options.max_role_resolution_depth, 100);
///
/// let from_file = ValidatorOptions::from_json(r#"{ "level": "Ua1", "check_annotations": false }"#)?;
/// assert!(!from_file.check_annotations);
/// # Ok::<(), pdf_ua_structure::error::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Conformance level to validate against
    pub level: PdfUaLevel,

    /// Maximum role map hops before resolution gives up
    ///
    /// Guards against cyclic or absurdly deep role maps. When the cap is hit
    /// the last role seen is used and a warning is recorded.
    pub max_role_resolution_depth: usize,

    /// Register the heading sequence checker
    pub check_heading_sequence: bool,

    /// Check annotation tagging and annotation placement
    pub check_annotations: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self::new(PdfUaLevel::Ua1)
    }
}

impl ValidatorOptions {
    /// Options with every check enabled for `level`.
    pub fn new(level: PdfUaLevel) -> Self {
        Self {
            level,
            max_role_resolution_depth: DEFAULT_MAX_ROLE_RESOLUTION_DEPTH,
            check_heading_sequence: true,
            check_annotations: true,
        }
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validated()
    }

    /// Set the conformance level.
    pub fn with_level(mut self, level: PdfUaLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the role resolution cap.
    pub fn with_max_role_resolution_depth(mut self, depth: usize) -> Self {
        self.max_role_resolution_depth = depth;
        self
    }

    /// Enable or disable heading sequence checking.
    pub fn with_heading_sequence(mut self, enabled: bool) -> Self {
        self.check_heading_sequence = enabled;
        self
    }

    /// Enable or disable annotation checks.
    pub fn with_annotations(mut self, enabled: bool) -> Self {
        self.check_annotations = enabled;
        self
    }

    /// Reject options the validator cannot run with.
    pub fn validated(self) -> Result<Self> {
        if self.max_role_resolution_depth == 0 {
            return Err(Error::Config(
                "max_role_resolution_depth must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ValidatorOptions::default();
        assert_eq!(options.level, PdfUaLevel::Ua1);
        assert_eq!(options.max_role_resolution_depth, DEFAULT_MAX_ROLE_RESOLUTION_DEPTH);
        assert!(options.check_heading_sequence);
        assert!(options.check_annotations);
    }

    #[test]
    fn test_from_json_partial() {
        let options = ValidatorOptions::from_json(r#"{"level": "Ua2"}"#).unwrap();
        assert_eq!(options.level, PdfUaLevel::Ua2);
        assert!(options.check_heading_sequence);
    }

    #[test]
    fn test_from_json_rejects_zero_depth() {
        let err = ValidatorOptions::from_json(r#"{"max_role_resolution_depth": 0}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ValidatorOptions::from_json("{ level: ").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
