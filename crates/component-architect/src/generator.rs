//! OpenAI-compatible completion client implementing the generation
//! capability.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use guardrail::{ChatMessage, ComponentGenerator, DesignSystem, GenerateError, SourceBundle};

use crate::config::Endpoint;
use crate::prompts;

static TS_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<<<TS>>>(.*?)<<<END_TS>>>").expect("valid regex"));
static HTML_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<<<HTML>>>(.*?)<<<END_HTML>>>").expect("valid regex"));
static SCSS_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<<<SCSS>>>(.*?)<<<END_SCSS>>>").expect("valid regex"));

/// Extract the TS / HTML / SCSS blocks from the model's raw transcript.
/// A missing block yields an empty fragment; the validator decides whether
/// that matters.
pub fn parse_code_blocks(raw: &str) -> SourceBundle {
    let grab = |pattern: &Regex| {
        pattern
            .captures(raw)
            .map(|caps| caps[1].trim().to_string())
            .unwrap_or_default()
    };

    SourceBundle {
        ts: grab(&TS_BLOCK),
        html: grab(&HTML_BLOCK),
        scss: grab(&SCSS_BLOCK),
        raw: raw.to_string(),
    }
}

/// Client for one OpenAI-compatible completion endpoint.
///
/// The system prompt (design tokens + output contract) is rendered once at
/// construction; per-call state is just the description, the correction
/// feedback, and the conversation history.
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: Endpoint,
    temperature: f32,
    system_prompt: String,
}

impl CompletionClient {
    pub fn new(endpoint: Endpoint, design_system: &DesignSystem, temperature: f32) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            temperature,
            system_prompt: prompts::system_prompt(design_system),
        }
    }
}

#[async_trait]
impl ComponentGenerator for CompletionClient {
    async fn generate(
        &self,
        description: &str,
        prior_errors: Option<&[String]>,
        history: &[ChatMessage],
    ) -> Result<SourceBundle, GenerateError> {
        let user = prompts::user_prompt(description, prior_errors);

        let mut messages =
            vec![serde_json::json!({ "role": "system", "content": self.system_prompt })];
        for turn in history {
            messages.push(serde_json::json!({ "role": turn.role, "content": turn.content }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": user }));

        let request_body = serde_json::json!({
            "model": self.endpoint.model,
            "temperature": self.temperature,
            "max_tokens": 4096,
            "messages": messages,
        });

        debug!(
            model = %self.endpoint.model,
            correcting = prior_errors.is_some(),
            history_turns = history.len(),
            "calling completion endpoint"
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.endpoint.url))
            .header("Authorization", format!("Bearer {}", self.endpoint.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GenerateError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::RequestFailed(format!(
                "completion endpoint error ({status}): {body}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenerateError::ParseError(e.to_string()))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                GenerateError::ParseError("response missing choices[0].message.content".into())
            })?;

        Ok(parse_code_blocks(content))
    }
}
