//! String-aware bracket balance scanning.

use crate::outcome::{Finding, FindingKind, Fragment, ValidationOutcome};

fn matching_opener(closer: char) -> char {
    match closer {
        '}' => '{',
        ']' => '[',
        _ => '(',
    }
}

/// Scan one fragment for balanced `{}` / `[]` / `()`.
///
/// Bracket characters inside a string or template-literal span are not
/// structural: a span opens on `"`, `'` or a backtick and closes on the
/// matching delimiter, unless the delimiter is escaped by an immediately
/// preceding backslash. Positions in findings are character offsets.
///
/// The scan stops at the first mismatched closer (there is no point
/// cascading errors off a broken stack); unmatched openers remaining at end
/// of input are reported as a single finding.
pub fn check_brackets(code: &str, fragment: Fragment, outcome: &mut ValidationOutcome) {
    let mut stack: Vec<char> = Vec::new();
    let mut in_str: Option<char> = None;
    let mut prev: Option<char> = None;

    for (i, ch) in code.chars().enumerate() {
        match in_str {
            None if matches!(ch, '"' | '\'' | '`') => in_str = Some(ch),
            Some(delim) if ch == delim && prev != Some('\\') => in_str = None,
            None => match ch {
                '{' | '[' | '(' => stack.push(ch),
                '}' | ']' | ')' => {
                    if stack.last() != Some(&matching_opener(ch)) {
                        outcome.add_error(Finding::new(
                            fragment,
                            FindingKind::Structural,
                            format!("Mismatched bracket '{ch}' at position {i}."),
                        ));
                        return;
                    }
                    stack.pop();
                }
                _ => {}
            },
            Some(_) => {}
        }
        prev = Some(ch);
    }

    if !stack.is_empty() {
        let remaining: Vec<String> = stack.iter().map(|c| format!("'{c}'")).collect();
        outcome.add_error(Finding::new(
            fragment,
            FindingKind::Structural,
            format!("Unclosed bracket(s): {}", remaining.join(", ")),
        ));
    }
}
