//! Fragment-by-fragment validation fan-out.

use crate::bundle::SourceBundle;
use crate::lint::{brackets, compliance, declaration, markup};
use crate::outcome::{Finding, FindingKind, Fragment, ValidationOutcome};
use crate::tokens::DesignTokens;

/// Run every checker appropriate to each fragment and aggregate one
/// outcome.
///
/// The TypeScript fragment is required: an empty one is an error and skips
/// its checkers. Empty template/style fragments are warnings only - a
/// component may legitimately use an inline template or carry no styles.
/// Checkers are independent; a failure in one never suppresses another.
pub fn validate_bundle(bundle: &SourceBundle, tokens: &DesignTokens) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::new();

    if bundle.ts.is_empty() {
        outcome.add_error(Finding::new(
            Fragment::Ts,
            FindingKind::EmptyFragment,
            "TypeScript block is empty.",
        ));
    } else {
        declaration::check_declaration(&bundle.ts, &mut outcome);
        brackets::check_brackets(&bundle.ts, Fragment::Ts, &mut outcome);
        compliance::check_colors(&bundle.ts, tokens, Fragment::Ts, &mut outcome);
    }

    if bundle.html.is_empty() {
        outcome.add_warning(Finding::new(
            Fragment::Html,
            FindingKind::EmptyOptional,
            "HTML block empty - component may use inline template (ok).",
        ));
    } else {
        markup::check_tags(&bundle.html, &mut outcome);
        compliance::check_colors(&bundle.html, tokens, Fragment::Html, &mut outcome);
    }

    if bundle.scss.is_empty() {
        outcome.add_warning(Finding::new(
            Fragment::Scss,
            FindingKind::EmptyOptional,
            "SCSS block empty - no styles generated.",
        ));
    } else {
        brackets::check_brackets(&bundle.scss, Fragment::Scss, &mut outcome);
        compliance::check_colors(&bundle.scss, tokens, Fragment::Scss, &mut outcome);
        compliance::check_border_radius(&bundle.scss, tokens, Fragment::Scss, &mut outcome);
        compliance::check_font(&bundle.scss, tokens, &mut outcome);
    }

    outcome
}
