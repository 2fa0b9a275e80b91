//! Agent configuration resolved from the environment.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Completion endpoint configuration.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// OpenAI-compatible base URL (the client appends `/chat/completions`).
    pub url: String,
    pub model: String,
    pub api_key: String,
}

/// Top-level agent configuration.
#[derive(Debug, Clone)]
pub struct ArchitectConfig {
    pub endpoint: Endpoint,
    /// Design-token document consumed by the guardrail.
    pub design_system_path: PathBuf,
    /// Directory generated component files are written to.
    pub output_dir: PathBuf,
    /// Sampling temperature for generation requests. Low by default:
    /// the output contract leaves no room for creativity in formatting.
    pub temperature: f32,
}

impl ArchitectConfig {
    /// Build from the environment.
    ///
    /// `GROQ_API_KEY` is required. Endpoint URL and model fall back to the
    /// public Groq OpenAI-compatible API; `ARCHITECT_URL` /
    /// `ARCHITECT_MODEL` override them for self-hosted endpoints.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .context("GROQ_API_KEY not set - get a free key at https://console.groq.com")?;

        Ok(Self {
            endpoint: Endpoint {
                url: std::env::var("ARCHITECT_URL")
                    .unwrap_or_else(|_| "https://api.groq.com/openai/v1".into()),
                model: std::env::var("ARCHITECT_MODEL")
                    .unwrap_or_else(|_| "llama-3.3-70b-versatile".into()),
                api_key,
            },
            design_system_path: "design_system.json".into(),
            output_dir: "output".into(),
            temperature: 0.2,
        })
    }
}
