//! Prompt construction for the generation collaborator.
//!
//! Prompt versioning: bump `PROMPT_VERSION` whenever prompt content changes.
//! This traces which prompt version produced a given transcript, useful for
//! debugging regressions in generation behavior.

use guardrail::DesignSystem;

/// Prompt version. Bump on any prompt content change.
pub const PROMPT_VERSION: &str = "1.3.0";

/// System preamble: embeds the design-system document and the exact output
/// contract the fragment extractor depends on.
pub fn system_prompt(design_system: &DesignSystem) -> String {
    let tokens =
        serde_json::to_string_pretty(design_system).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are an expert Angular frontend engineer.
Your ONLY job is to produce raw Angular component code. No explanations, no markdown prose, no greetings.

=== DESIGN SYSTEM (use ONLY these tokens) ===
{tokens}

=== OUTPUT FORMAT (follow exactly, no extra text) ===
<<<TS>>>
<TypeScript component class here>
<<<END_TS>>>

<<<HTML>>>
<Angular template here>
<<<END_HTML>>>

<<<SCSS>>>
<SCSS styles here>
<<<END_SCSS>>>

=== STRICT RULES ===
1. Use ONLY hex color values from the design system \"colors\" section. Never invent colors.
2. Use ONLY border-radius values from the \"borders\" section.
3. Use ONLY font-family from the \"typography\" section.
4. Include a valid @Component decorator with selector and inline template/styles.
5. Every opening bracket/tag must have a matching closing bracket/tag.
6. No placeholder colors like #ccc, #000 unless they are in the design system.
7. Self-contained - imports only from @angular/core and @angular/material.
8. Include proper TypeScript types (no implicit any).
"
    )
}

/// User prompt: the component description, plus - on correction cycles -
/// the previous attempt's error list.
pub fn user_prompt(description: &str, prior_errors: Option<&[String]>) -> String {
    let mut prompt = format!("Generate an Angular component for: {description}");

    if let Some(errors) = prior_errors.filter(|errors| !errors.is_empty()) {
        let listing: String = errors
            .iter()
            .map(|error| format!("  - {error}\n"))
            .collect();
        prompt.push_str(&format!(
            "\n\nSELF-CORRECTION REQUEST:\n\
             The previous generation had these validation errors. Fix ALL of them:\n\
             {listing}\n\
             Re-generate the FULL component (all three blocks) with every error corrected.\n"
        ));
    }

    prompt
}
