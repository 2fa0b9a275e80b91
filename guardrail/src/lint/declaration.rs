//! Required component-metadata markers in the TypeScript fragment.

use crate::outcome::{Finding, FindingKind, Fragment, ValidationOutcome};

/// Verify the `@Component` decorator and its required properties are
/// present. The three checks are independent; one missing marker never
/// masks another.
pub fn check_declaration(ts: &str, outcome: &mut ValidationOutcome) {
    if !ts.contains("@Component") {
        outcome.add_error(Finding::new(
            Fragment::Ts,
            FindingKind::Declaration,
            "Missing @Component decorator.",
        ));
    }
    if !ts.contains("selector:") {
        outcome.add_error(Finding::new(
            Fragment::Ts,
            FindingKind::Declaration,
            "@Component missing 'selector'.",
        ));
    }
    if !ts.contains("template:") && !ts.contains("templateUrl:") {
        outcome.add_error(Finding::new(
            Fragment::Ts,
            FindingKind::Declaration,
            "@Component missing 'template' or 'templateUrl'.",
        ));
    }
}
