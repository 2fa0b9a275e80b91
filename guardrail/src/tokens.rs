//! Design-token registry.
//!
//! Loads the approved tokens (colors, corner radii, font family) from a
//! design-system JSON document. The registry is built once per session and
//! passed by reference to every checker; it is never mutated afterwards.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading the design-system document.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("failed to read design system at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid design system JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The on-disk design-system document.
///
/// ```json
/// {
///   "colors": { "primary": "#4f46e5" },
///   "borders": { "radius-md": "8px" },
///   "typography": { "font-family": "'Inter', sans-serif" }
/// }
/// ```
///
/// Only `borders` entries whose key names a radius contribute to the
/// approved radius set; other border tokens (widths, styles) are carried
/// for prompt embedding but not enforced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignSystem {
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub borders: BTreeMap<String, String>,
    #[serde(default)]
    pub typography: Typography,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Typography {
    #[serde(rename = "font-family", default)]
    pub font_family: String,
}

impl DesignSystem {
    /// Load the document from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TokenError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TokenError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Approved token sets, canonicalized for comparison.
#[derive(Debug, Clone)]
pub struct DesignTokens {
    /// Lowercase six-digit `#rrggbb` forms.
    colors: HashSet<String>,
    /// Lowercase radius values; ordered so error messages are deterministic.
    radii: BTreeSet<String>,
    font_family: String,
}

impl DesignTokens {
    /// Build the registry from a loaded document.
    pub fn from_document(doc: &DesignSystem) -> Self {
        let colors = doc
            .colors
            .values()
            .filter_map(|value| canonical_hex(value))
            .collect();

        let mut radii: BTreeSet<String> = doc
            .borders
            .iter()
            .filter(|(key, _)| key.contains("radius"))
            .map(|(_, value)| value.to_lowercase())
            .collect();
        // 0 and 0px are a valid CSS reset, not a token violation.
        radii.insert("0".to_string());
        radii.insert("0px".to_string());

        Self {
            colors,
            radii,
            font_family: doc.typography.font_family.clone(),
        }
    }

    /// Convenience: load the document at `path` and build the registry.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TokenError> {
        Ok(Self::from_document(&DesignSystem::from_path(path)?))
    }

    /// Whether a `#`-prefixed hex literal names an approved color.
    ///
    /// Three-digit literals and their doubled six-digit expansions are the
    /// same token; comparison is case-insensitive.
    pub fn is_approved_color(&self, literal: &str) -> bool {
        canonical_hex(literal).is_some_and(|canon| self.colors.contains(&canon))
    }

    /// Whether a `border-radius` value is approved (case-insensitive exact
    /// match, `0`/`0px` always allowed).
    pub fn is_approved_radius(&self, value: &str) -> bool {
        self.radii.contains(&value.to_lowercase())
    }

    /// Allowed radius values in sorted order, for error messages.
    pub fn allowed_radii(&self) -> Vec<&str> {
        self.radii.iter().map(String::as_str).collect()
    }

    /// The configured font-family string, verbatim.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// First comma-separated family of the configured font, lowercased and
    /// stripped of quotes. Empty when no font is configured.
    pub fn primary_font(&self) -> String {
        self.font_family
            .to_lowercase()
            .replace(['\'', '"'], "")
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .to_string()
    }
}

/// Canonicalize a hex color literal to its lowercase six-digit `#rrggbb`
/// form. Returns `None` for anything that is not a 3- or 6-digit hex string.
fn canonical_hex(literal: &str) -> Option<String> {
    let digits = literal.strip_prefix('#').unwrap_or(literal).to_lowercase();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => Some(format!("#{digits}")),
        3 => {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            Some(format!("#{doubled}"))
        }
        _ => None,
    }
}
