//! Built-in two-step demo: generate a login card, then refine it on the
//! same slug to exercise the multi-turn path end to end.

use std::path::Path;

use anyhow::Result;

use guardrail::{ComponentGenerator, DesignTokens};

use crate::artifacts;
use crate::run;
use crate::session::SessionState;

const FIRST_PROMPT: &str =
    "A login card with glassmorphism effect, email and password inputs, and a sign-in button";
const FOLLOWUP_PROMPT: &str =
    "Now make the sign-in button fully rounded with a gradient from primary to primary-dark";

pub async fn run_demo(
    generator: &dyn ComponentGenerator,
    tokens: &DesignTokens,
    output_dir: &Path,
) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("  DEMO: Login card -> multi-turn edit");
    println!("{}", "=".repeat(60));

    let mut session = SessionState::new();

    let first = run::run_agent(FIRST_PROMPT, &session, generator, tokens, output_dir).await?;
    run::print_summary(&first);
    session.record_turn(FIRST_PROMPT, &first.report.best.bundle.raw);
    session.lock_slug(&first.slug);

    let second = run::run_agent(FOLLOWUP_PROMPT, &session, generator, tokens, output_dir).await?;
    run::print_summary(&second);

    println!(
        "  DEMO COMPLETE | Generation: {} | Follow-up: {}",
        if first.passed() { "PASS" } else { "FAIL" },
        if second.passed() { "PASS" } else { "FAIL" },
    );

    let path = artifacts::export_tsx(&second.report.best.bundle, output_dir, &second.slug)?;
    println!("TSX exported -> {}", path.display());
    Ok(())
}
