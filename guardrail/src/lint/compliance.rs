//! Design-token compliance scanning: raw colors, corner radii, font family.

use std::sync::LazyLock;

use regex::Regex;

use crate::outcome::{Finding, FindingKind, Fragment, ValidationOutcome};
use crate::tokens::DesignTokens;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("valid regex"));

static BORDER_RADIUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)border-radius\s*:\s*([^;{]+)").expect("valid regex"));

static FONT_FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-family\s*:\s*([^;]+)").expect("valid regex"));

/// Flag every hex color literal not present in the approved set.
///
/// Occurrences are reported individually: the same unauthorized value
/// appearing twice produces two findings, so the correction prompt names
/// every site that needs fixing.
pub fn check_colors(
    code: &str,
    tokens: &DesignTokens,
    fragment: Fragment,
    outcome: &mut ValidationOutcome,
) {
    for caps in HEX_COLOR.captures_iter(code) {
        let literal = format!("#{}", caps[1].to_lowercase());
        if !tokens.is_approved_color(&literal) {
            outcome.add_error(Finding::new(
                fragment,
                FindingKind::Compliance,
                format!("Unauthorized color '{literal}' - use a design system color."),
            ));
        }
    }
}

/// Check `border-radius` declarations against the approved radii.
///
/// Values behind `var(...)` indirection and multi-value shorthand cannot be
/// token-checked lexically and are skipped rather than guessed at.
pub fn check_border_radius(
    code: &str,
    tokens: &DesignTokens,
    fragment: Fragment,
    outcome: &mut ValidationOutcome,
) {
    for caps in BORDER_RADIUS.captures_iter(code) {
        let value = caps[1].trim().to_lowercase();
        if value.starts_with("var(") || value.contains(' ') {
            continue;
        }
        if !tokens.is_approved_radius(&value) {
            outcome.add_error(Finding::new(
                fragment,
                FindingKind::Compliance,
                format!(
                    "Unauthorized border-radius '{value}' - allowed: {}",
                    tokens.allowed_radii().join(", ")
                ),
            ));
        }
    }
}

/// Warn when a declared font-family does not include the primary design
/// token family. Font mismatches never block a pass.
pub fn check_font(scss: &str, tokens: &DesignTokens, outcome: &mut ValidationOutcome) {
    let primary = tokens.primary_font();
    if primary.is_empty() {
        return;
    }
    for caps in FONT_FAMILY.captures_iter(scss) {
        let used = caps[1].trim().to_lowercase().replace(['\'', '"'], "");
        if !used.contains(&primary) {
            outcome.add_warning(Finding::new(
                Fragment::Scss,
                FindingKind::FontMismatch,
                format!(
                    "font-family '{used}' doesn't match design token '{}'.",
                    tokens.font_family()
                ),
            ));
        }
    }
}
