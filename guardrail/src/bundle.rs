//! The three-fragment output of one generation attempt.

use serde::{Deserialize, Serialize};

use crate::outcome::Fragment;

/// Source fragments produced by one generation attempt.
///
/// The TypeScript fragment is semantically required; the template and style
/// fragments may be empty (an empty one is a validation warning, not an
/// error). Fragments are stored trimmed, exactly as extracted from the
/// model transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBundle {
    pub ts: String,
    pub html: String,
    pub scss: String,
    /// Raw model transcript the fragments were extracted from.
    #[serde(default)]
    pub raw: String,
}

impl SourceBundle {
    /// Bundle with only code fragments, no transcript. Test and stub
    /// constructor.
    pub fn from_fragments(
        ts: impl Into<String>,
        html: impl Into<String>,
        scss: impl Into<String>,
    ) -> Self {
        Self {
            ts: ts.into(),
            html: html.into(),
            scss: scss.into(),
            raw: String::new(),
        }
    }

    pub fn fragment(&self, fragment: Fragment) -> &str {
        match fragment {
            Fragment::Ts => &self.ts,
            Fragment::Html => &self.html,
            Fragment::Scss => &self.scss,
        }
    }

    /// True when every code fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.ts.is_empty() && self.html.is_empty() && self.scss.is_empty()
    }
}
