//! CLI entry point for Guided Component Architect.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;

use component_architect::{
    artifacts, demo, interactive, run, ArchitectConfig, CompletionClient, SessionState,
};
use guardrail::{DesignSystem, DesignTokens};

#[derive(Parser, Debug)]
#[command(
    name = "component-architect",
    about = "Generate Angular components from natural-language descriptions, linted against a design system"
)]
struct Cli {
    /// Component description (omit when using --interactive or --demo).
    prompt: Option<String>,

    /// Multi-turn REPL for iterative editing.
    #[arg(short, long)]
    interactive: bool,

    /// Run the built-in two-step demo.
    #[arg(long)]
    demo: bool,

    /// Also export the result as a React .tsx preview.
    #[arg(long)]
    export_tsx: bool,

    /// Directory generated files are written to.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Design-system token document.
    #[arg(long, default_value = "design_system.json")]
    design_system: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ArchitectConfig::from_env()?;
    config.design_system_path = cli.design_system;
    config.output_dir = cli.output_dir;

    let document = DesignSystem::from_path(&config.design_system_path).with_context(|| {
        format!(
            "loading design system from {}",
            config.design_system_path.display()
        )
    })?;
    let tokens = DesignTokens::from_document(&document);
    let client = CompletionClient::new(config.endpoint.clone(), &document, config.temperature);

    info!(
        endpoint = %config.endpoint.url,
        model = %config.endpoint.model,
        design_system = %config.design_system_path.display(),
        "component architect starting"
    );

    if cli.demo {
        demo::run_demo(&client, &tokens, &config.output_dir).await?;
    } else if cli.interactive {
        interactive::run_shell(&client, &tokens, &config.output_dir).await?;
    } else if let Some(prompt) = cli.prompt {
        let session = SessionState::new();
        let outcome =
            run::run_agent(&prompt, &session, &client, &tokens, &config.output_dir).await?;
        run::print_summary(&outcome);

        if cli.export_tsx {
            let path = artifacts::export_tsx(
                &outcome.report.best.bundle,
                &config.output_dir,
                &outcome.slug,
            )?;
            println!("TSX exported -> {}", path.display());
        }
    } else {
        Cli::command().print_help()?;
        println!();
    }

    Ok(())
}
