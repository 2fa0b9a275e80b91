//! Guided Component Architect - the agent shell around the guardrail core.
//!
//! Wires the pieces of a run together: configuration from the environment,
//! an OpenAI-compatible completion client as the generation collaborator,
//! prompt construction, multi-turn session state, and on-disk artifact
//! writing. The generate → validate → self-correct loop itself lives in the
//! `guardrail` crate; this crate drives it and presents the result.

pub mod artifacts;
pub mod config;
pub mod demo;
pub mod generator;
pub mod interactive;
pub mod prompts;
pub mod run;
pub mod session;

pub use config::{ArchitectConfig, Endpoint};
pub use generator::CompletionClient;
pub use run::{run_agent, RunOutcome};
pub use session::SessionState;
