//! Validation findings and the aggregated pass/fail outcome.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source fragment a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fragment {
    Ts,
    Html,
    Scss,
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ts => write!(f, "TS"),
            Self::Html => write!(f, "HTML"),
            Self::Scss => write!(f, "SCSS"),
        }
    }
}

/// Classification of a finding.
///
/// The first five kinds only ever appear as errors; the last two only as
/// warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Mismatched or unclosed bracket.
    Structural,
    /// Mismatched or unclosed markup tag.
    Markup,
    /// Unauthorized color or radius value.
    Compliance,
    /// Missing required component-metadata marker.
    Declaration,
    /// Required fragment is absent.
    EmptyFragment,
    /// Optional fragment is absent.
    EmptyOptional,
    /// font-family does not match the design token.
    FontMismatch,
}

/// One validation finding, tagged with its source fragment.
///
/// Rendered as `[TS] message` - the shape forwarded verbatim to the
/// generation collaborator on correction cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub fragment: Fragment,
    pub kind: FindingKind,
    pub message: String,
}

impl Finding {
    pub fn new(fragment: Fragment, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            fragment,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.fragment, self.message)
    }
}

/// Aggregated result of validating one source bundle.
///
/// Errors and warnings keep insertion order. The outcome passes iff the
/// error list is empty; warnings never block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationOutcome {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, finding: Finding) {
        self.errors.push(finding);
    }

    pub fn add_warning(&mut self, finding: Finding) {
        self.warnings.push(finding);
    }

    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Finding] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    /// Rendered error lines (`[TS] ...`), the exact feedback forwarded to
    /// the next generation attempt. Warnings are intentionally excluded.
    pub fn error_lines(&self) -> Vec<String> {
        self.errors.iter().map(Finding::to_string).collect()
    }

    /// Compact one-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "{} - {} error(s), {} warning(s)",
            if self.passed() { "PASSED" } else { "FAILED" },
            self.errors.len(),
            self.warnings.len(),
        )
    }
}
