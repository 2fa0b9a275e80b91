//! Interactive multi-turn shell.
//!
//! The first prompt generates a component; follow-ups refine it using the
//! conversation history and the slug locked on the first turn. Commands:
//! `reset` starts a new component, `export` writes the React preview,
//! `exit` leaves.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;

use guardrail::{ComponentGenerator, DesignTokens, SourceBundle};

use crate::artifacts;
use crate::run;
use crate::session::SessionState;

pub async fn run_shell(
    generator: &dyn ComponentGenerator,
    tokens: &DesignTokens,
    output_dir: &Path,
) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("  Guided Component Architect - Interactive Mode");
    println!("{}", "=".repeat(60));
    println!("  Commands: 'reset' | 'export' | 'exit'");
    println!("  First prompt  -> generates a component");
    println!("  Follow-ups    -> refine the same component");
    println!("{}", "=".repeat(60));
    println!();

    let mut session = SessionState::new();
    let mut last_best: Option<SourceBundle> = None;

    let stdin = io::stdin();
    loop {
        let label = if session.is_followup() {
            "Follow-up edit"
        } else {
            "Describe a component"
        };
        print!("[{label}] > ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF (ctrl-d / piped input exhausted).
            println!();
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" => {
                println!("Goodbye!");
                break;
            }
            "reset" => {
                session.reset();
                last_best = None;
                println!("Conversation reset. Describe a new component.");
                println!();
                continue;
            }
            "export" => {
                match (&last_best, session.slug()) {
                    (Some(bundle), Some(slug)) => {
                        let path = artifacts::export_tsx(bundle, output_dir, slug)?;
                        println!("TSX exported -> {}", path.display());
                    }
                    _ => println!("Nothing generated yet."),
                }
                continue;
            }
            _ => {}
        }

        let outcome = run::run_agent(input, &session, generator, tokens, output_dir).await?;
        run::print_summary(&outcome);

        session.record_turn(input, &outcome.report.best.bundle.raw);
        session.lock_slug(&outcome.slug);
        last_best = Some(outcome.report.best.bundle.clone());

        println!("Follow-up to refine | 'export' for .tsx | 'reset' for new component");
        println!();
    }

    Ok(())
}
