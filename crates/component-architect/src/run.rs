//! One full agent run: drive the correction loop, persist the best attempt,
//! report the result.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use guardrail::{run_correction, ComponentGenerator, CorrectionReport, DesignTokens, LoopState};

use crate::artifacts;
use crate::session::SessionState;

/// What a single run produced, for the CLI summary and the interactive
/// shell.
#[derive(Debug)]
pub struct RunOutcome {
    pub slug: String,
    pub report: CorrectionReport,
    /// Files written for the best attempt.
    pub written: Vec<PathBuf>,
    pub elapsed_secs: f64,
}

impl RunOutcome {
    pub fn passed(&self) -> bool {
        self.report.passed()
    }

    pub fn remaining_errors(&self) -> Vec<String> {
        self.report.remaining_errors()
    }
}

/// Run the generate → validate → self-correct loop for one description and
/// write the best attempt's fragments to disk.
pub async fn run_agent(
    description: &str,
    session: &SessionState,
    generator: &dyn ComponentGenerator,
    tokens: &DesignTokens,
    output_dir: &Path,
) -> Result<RunOutcome> {
    let slug = session.resolve_slug(description);
    let started = Instant::now();

    info!(
        slug = %slug,
        followup = session.is_followup(),
        "starting component run"
    );

    let report = run_correction(description, session.history(), generator, tokens).await;

    match report.state {
        LoopState::DonePass => {
            info!(iterations = report.iterations, "validation passed");
        }
        _ => {
            warn!(
                iterations = report.iterations,
                remaining = report.best.outcome.errors().len(),
                "attempt budget exhausted - keeping best attempt"
            );
        }
    }

    let written = artifacts::write_component(&report.best.bundle, output_dir, &slug)?;

    Ok(RunOutcome {
        slug,
        report,
        written,
        elapsed_secs: started.elapsed().as_secs_f64(),
    })
}

/// Print the user-facing result summary to stdout.
pub fn print_summary(outcome: &RunOutcome) {
    let errors = outcome.remaining_errors();
    let status = if outcome.passed() {
        "SUCCESS"
    } else if errors.len() <= 2 {
        "COMPLETED WITH ERRORS"
    } else {
        "FAILED"
    };

    println!("{}", "=".repeat(60));
    println!("  RESULT SUMMARY");
    println!("{}", "=".repeat(60));
    println!("  Status     : {status}");
    println!("  Component  : {}", outcome.slug);
    println!("  Iterations : {}", outcome.report.iterations);
    println!("  Elapsed    : {:.1}s", outcome.elapsed_secs);
    println!("  Errors     : {}", errors.len());

    if !errors.is_empty() {
        println!();
        println!("  Remaining errors:");
        for error in &errors {
            println!("    x {error}");
        }
    }

    if !outcome.written.is_empty() {
        println!();
        println!("  Files written:");
        for path in &outcome.written {
            println!("    {}", path.display());
        }
    }
    println!("{}", "=".repeat(60));
}
