//! Stack-based open/close tag matching for the markup fragment.

use std::sync::LazyLock;

use regex::Regex;

use crate::outcome::{Finding, FindingKind, Fragment, ValidationOutcome};

/// Elements that never take a closing tag.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9-]*)([^>]*)>").expect("valid regex"));

/// Match opening and closing tags in the markup fragment.
///
/// Tags are extracted lexically; void elements and anything written
/// self-closing (`<foo ... />`) are skipped. Names are compared
/// lowercase. The scan stops at the first closing tag that does not match
/// the innermost open tag; tags still open at end of input are reported as
/// a single finding.
pub fn check_tags(html: &str, outcome: &mut ValidationOutcome) {
    let mut stack: Vec<String> = Vec::new();

    for caps in TAG_PATTERN.captures_iter(html) {
        let closing = &caps[1] == "/";
        let name = caps[2].to_lowercase();
        let attrs = caps.get(3).map_or("", |m| m.as_str());

        if VOID_ELEMENTS.contains(&name.as_str()) || attrs.trim_end().ends_with('/') {
            continue;
        }

        if !closing {
            stack.push(name);
        } else if stack.last().map(String::as_str) == Some(name.as_str()) {
            stack.pop();
        } else {
            let expected = stack.last().map_or("none", String::as_str);
            outcome.add_error(Finding::new(
                Fragment::Html,
                FindingKind::Markup,
                format!("Unexpected </{name}> - expected </{expected}>."),
            ));
            return;
        }
    }

    if !stack.is_empty() {
        outcome.add_error(Finding::new(
            Fragment::Html,
            FindingKind::Markup,
            format!("Unclosed tag(s): {}", stack.join(", ")),
        ));
    }
}
