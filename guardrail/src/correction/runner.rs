//! The bounded generate → validate → retry driver.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bundle::SourceBundle;
use crate::correction::state::{LoopState, LoopStateMachine};
use crate::outcome::ValidationOutcome;
use crate::tokens::DesignTokens;
use crate::validate::validate_bundle;

/// Maximum generation attempts per run. Fixed: error severity never extends
/// the budget.
pub const MAX_ATTEMPTS: u32 = 3;

/// One conversation turn forwarded to the generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Failure reported by a generation collaborator.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("generation request failed: {0}")]
    RequestFailed(String),

    #[error("could not parse generation response: {0}")]
    ParseError(String),
}

/// Capability handle for the external text-generation service.
///
/// Injected into [`run_correction`] rather than resolved from a global, so
/// the loop stays testable with stub collaborators. The loop treats a
/// returned error as a blown attempt, not a reason to abort: the cycle
/// validates an empty bundle and the run continues.
#[async_trait]
pub trait ComponentGenerator: Send + Sync {
    /// Produce a source bundle for `description`. On correction cycles
    /// `prior_errors` carries the previous attempt's rendered error list;
    /// `history` carries prior conversation turns for follow-up edits.
    async fn generate(
        &self,
        description: &str,
        prior_errors: Option<&[String]>,
        history: &[ChatMessage],
    ) -> Result<SourceBundle, GenerateError>;
}

/// One completed attempt: the bundle and its validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 1-based attempt number.
    pub attempt: u32,
    pub timestamp: DateTime<Utc>,
    pub bundle: SourceBundle,
    pub outcome: ValidationOutcome,
}

/// Compact per-attempt bookkeeping carried in the final report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub attempt: u32,
    pub timestamp: DateTime<Utc>,
    pub passed: bool,
    pub error_count: usize,
    pub warning_count: usize,
    /// Set when the collaborator itself failed this cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_error: Option<String>,
}

/// Result of a complete correction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionReport {
    /// Terminal loop state (`DonePass` or `DoneExhausted`).
    pub state: LoopState,
    /// Attempts actually used.
    pub iterations: u32,
    pub attempts: Vec<AttemptSummary>,
    pub duration_ms: u64,
    /// The retained best attempt: fewest errors, first wins ties.
    pub best: IterationRecord,
}

impl CorrectionReport {
    pub fn passed(&self) -> bool {
        matches!(self.state, LoopState::DonePass)
    }

    /// Rendered errors remaining on the retained best attempt.
    pub fn remaining_errors(&self) -> Vec<String> {
        self.best.outcome.error_lines()
    }
}

fn advance(machine: &mut LoopStateMachine, to: LoopState, reason: Option<&str>) {
    if let Err(err) = machine.advance(to, reason) {
        // The driver only takes edges from the legal table; reaching this
        // arm is a bug, but a broken audit trail is not worth a panic.
        warn!(%err, "loop driver took an unexpected edge");
    }
}

/// Drive up to [`MAX_ATTEMPTS`] generate → validate cycles.
///
/// From the second cycle onward the collaborator receives the previous
/// outcome's error list - never its warnings - with the expectation that it
/// addresses every entry. The first attempt always becomes the retained
/// best; a later attempt replaces it only with strictly fewer errors, so
/// ties keep the earlier attempt. A pass stops the loop immediately even
/// with budget remaining.
pub async fn run_correction(
    description: &str,
    history: &[ChatMessage],
    generator: &dyn ComponentGenerator,
    tokens: &DesignTokens,
) -> CorrectionReport {
    let started = Instant::now();
    let mut machine = LoopStateMachine::new();
    let mut attempts: Vec<AttemptSummary> = Vec::new();
    let mut best: Option<IterationRecord> = None;
    let mut prior_errors: Option<Vec<String>> = None;
    let mut iterations = 0;

    for attempt in 1..=MAX_ATTEMPTS {
        iterations = attempt;
        machine.set_attempt(attempt);
        advance(&mut machine, LoopState::Generating, None);

        info!(
            attempt,
            max = MAX_ATTEMPTS,
            correcting = prior_errors.is_some(),
            "generation attempt"
        );

        let (bundle, generator_error) = match generator
            .generate(description, prior_errors.as_deref(), history)
            .await
        {
            Ok(bundle) => (bundle, None),
            Err(err) => {
                warn!(attempt, error = %err, "generation failed - recording empty attempt");
                (SourceBundle::default(), Some(err.to_string()))
            }
        };

        advance(&mut machine, LoopState::Validating, None);
        let outcome = validate_bundle(&bundle, tokens);
        let timestamp = Utc::now();

        info!(
            attempt,
            errors = outcome.errors().len(),
            warnings = outcome.warnings().len(),
            passed = outcome.passed(),
            "validation complete"
        );

        attempts.push(AttemptSummary {
            attempt,
            timestamp,
            passed: outcome.passed(),
            error_count: outcome.errors().len(),
            warning_count: outcome.warnings().len(),
            generator_error,
        });

        let passed = outcome.passed();
        let errors = outcome.error_lines();
        let record = IterationRecord {
            attempt,
            timestamp,
            bundle,
            outcome,
        };

        let replace = match &best {
            None => true,
            Some(current) => record.outcome.errors().len() < current.outcome.errors().len(),
        };
        if replace {
            best = Some(record);
        }

        if passed {
            advance(&mut machine, LoopState::DonePass, Some("validation passed"));
            break;
        }
        if attempt == MAX_ATTEMPTS {
            advance(
                &mut machine,
                LoopState::DoneExhausted,
                Some("attempt budget exhausted"),
            );
        } else {
            prior_errors = Some(errors);
        }
    }

    let best = best.unwrap_or_else(|| IterationRecord {
        // MAX_ATTEMPTS >= 1 means at least one attempt ran; this arm only
        // exists to keep the driver total.
        attempt: 0,
        timestamp: Utc::now(),
        bundle: SourceBundle::default(),
        outcome: ValidationOutcome::new(),
    });

    CorrectionReport {
        state: machine.current(),
        iterations,
        attempts,
        duration_ms: started.elapsed().as_millis() as u64,
        best,
    }
}
