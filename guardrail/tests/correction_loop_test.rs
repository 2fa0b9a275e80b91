//! Correction-loop integration tests with scripted stub collaborators.
//!
//! Each stub implements `ComponentGenerator` over a queue of canned
//! responses and records the feedback it was given, so the tests can assert
//! both the loop's outcome and the exact error list forwarded between
//! cycles.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use guardrail::{
    run_correction, ChatMessage, ComponentGenerator, DesignSystem, DesignTokens, GenerateError,
    LoopState, SourceBundle, MAX_ATTEMPTS,
};

/// Stub collaborator: pops one scripted response per call and records the
/// prior-error feedback each call received. The last response repeats once
/// the script runs dry.
struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<SourceBundle, GenerateError>>>,
    feedback_seen: Mutex<Vec<Option<Vec<String>>>>,
}

impl ScriptedGenerator {
    fn new(script: Vec<Result<SourceBundle, GenerateError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            feedback_seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.feedback_seen.lock().unwrap().len()
    }

    fn feedback_for_call(&self, index: usize) -> Option<Vec<String>> {
        self.feedback_seen.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl ComponentGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _description: &str,
        prior_errors: Option<&[String]>,
        _history: &[ChatMessage],
    ) -> Result<SourceBundle, GenerateError> {
        self.feedback_seen
            .lock()
            .unwrap()
            .push(prior_errors.map(<[String]>::to_vec));

        let mut script = self.script.lock().unwrap();
        let next = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().map(clone_response)
        };
        next.unwrap_or_else(|| Ok(SourceBundle::default()))
    }
}

fn clone_response(
    response: &Result<SourceBundle, GenerateError>,
) -> Result<SourceBundle, GenerateError> {
    match response {
        Ok(bundle) => Ok(bundle.clone()),
        Err(GenerateError::RequestFailed(msg)) => Err(GenerateError::RequestFailed(msg.clone())),
        Err(GenerateError::ParseError(msg)) => Err(GenerateError::ParseError(msg.clone())),
    }
}

fn tokens() -> DesignTokens {
    let doc: DesignSystem = serde_json::from_str(
        r##"{
            "colors": { "primary": "#4f46e5" },
            "borders": { "radius-md": "8px" },
            "typography": { "font-family": "'Inter', sans-serif" }
        }"##,
    )
    .unwrap();
    DesignTokens::from_document(&doc)
}

fn clean_bundle() -> SourceBundle {
    SourceBundle::from_fragments(
        "@Component({ selector: 'app-card', template: '<p>ok</p>' }) export class CardComponent {}",
        "<div><span>hi</span></div>",
        ".card { color: #4f46e5; border-radius: 8px; }",
    )
}

/// Two errors: missing selector marker and an unauthorized color.
fn bad_bundle() -> SourceBundle {
    SourceBundle::from_fragments(
        "@Component({ template: '<p>x</p>' }) export class CardComponent { c = '#ccc'; }",
        "<div></div>",
        "",
    )
}

/// One error: an unauthorized color in the styles.
fn slightly_bad_bundle() -> SourceBundle {
    SourceBundle::from_fragments(
        "@Component({ selector: 'app-card', template: '<p>x</p>' }) export class CardComponent {}",
        "<div></div>",
        ".card { color: #ccc; }",
    )
}

#[tokio::test]
async fn test_persistent_errors_exhaust_budget_and_keep_first_attempt() {
    let generator = ScriptedGenerator::new(vec![Ok(bad_bundle())]);

    let report = run_correction("a card", &[], &generator, &tokens()).await;

    assert_eq!(report.state, LoopState::DoneExhausted);
    assert!(!report.passed());
    assert_eq!(report.iterations, MAX_ATTEMPTS);
    assert_eq!(generator.calls(), MAX_ATTEMPTS as usize);
    // Error count never improved, so the tie-break retains attempt 1.
    assert_eq!(report.best.attempt, 1);
    assert_eq!(report.attempts.len(), 3);
    assert!(report.attempts.iter().all(|a| !a.passed));
}

#[tokio::test]
async fn test_pass_on_second_attempt_stops_early() {
    let generator = ScriptedGenerator::new(vec![Ok(bad_bundle()), Ok(clean_bundle())]);

    let report = run_correction("a card", &[], &generator, &tokens()).await;

    assert_eq!(report.state, LoopState::DonePass);
    assert!(report.passed());
    assert_eq!(report.iterations, 2);
    assert_eq!(generator.calls(), 2);
    assert_eq!(report.best.attempt, 2);
    assert!(report.best.outcome.passed());
}

#[tokio::test]
async fn test_clean_first_attempt_uses_one_iteration() {
    let generator = ScriptedGenerator::new(vec![Ok(clean_bundle())]);

    let report = run_correction("a card", &[], &generator, &tokens()).await;

    assert!(report.passed());
    assert_eq!(report.iterations, 1);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_feedback_forwards_exact_error_list_and_only_errors() {
    let generator = ScriptedGenerator::new(vec![Ok(bad_bundle()), Ok(clean_bundle())]);

    let report = run_correction("a card", &[], &generator, &tokens()).await;
    assert!(report.passed());

    // First call gets no feedback.
    assert_eq!(generator.feedback_for_call(0), None);

    // Second call gets exactly the first attempt's rendered errors.
    let forwarded = generator.feedback_for_call(1).unwrap();
    assert_eq!(
        forwarded,
        vec![
            "[TS] @Component missing 'selector'.".to_string(),
            "[TS] Unauthorized color '#ccc' - use a design system color.".to_string(),
        ]
    );
    // The empty-SCSS warning must not be forwarded.
    assert!(forwarded.iter().all(|line| !line.contains("SCSS block empty")));
}

#[tokio::test]
async fn test_strictly_fewer_errors_replaces_best() {
    let generator = ScriptedGenerator::new(vec![Ok(bad_bundle()), Ok(slightly_bad_bundle())]);

    let report = run_correction("a card", &[], &generator, &tokens()).await;

    assert_eq!(report.state, LoopState::DoneExhausted);
    // Attempt 2 has one error against attempt 1's two; attempt 3 repeats
    // attempt 2's bundle and ties, so best stays at attempt 2.
    assert_eq!(report.best.attempt, 2);
    assert_eq!(report.best.outcome.errors().len(), 1);
}

#[tokio::test]
async fn test_equal_error_count_keeps_earlier_attempt() {
    // Two different bundles with identical error counts.
    let generator =
        ScriptedGenerator::new(vec![Ok(slightly_bad_bundle()), Ok(slightly_bad_bundle())]);

    let report = run_correction("a card", &[], &generator, &tokens()).await;

    assert_eq!(report.best.attempt, 1);
}

#[tokio::test]
async fn test_generator_failure_is_a_blown_attempt_not_an_abort() {
    let generator = ScriptedGenerator::new(vec![
        Err(GenerateError::RequestFailed("connection refused".into())),
        Ok(clean_bundle()),
    ]);

    let report = run_correction("a card", &[], &generator, &tokens()).await;

    assert!(report.passed());
    assert_eq!(report.iterations, 2);
    assert_eq!(
        report.attempts[0].generator_error.as_deref(),
        Some("generation request failed: connection refused")
    );
    // The blown cycle still completed a validation pass over the empty
    // bundle.
    assert_eq!(report.attempts[0].error_count, 1);
    assert!(report.attempts[1].generator_error.is_none());
}

#[tokio::test]
async fn test_empty_bundle_never_passes() {
    let generator = ScriptedGenerator::new(vec![Ok(SourceBundle::default())]);

    let report = run_correction("a card", &[], &generator, &tokens()).await;

    assert!(!report.passed());
    assert_eq!(
        report.best.outcome.errors()[0].to_string(),
        "[TS] TypeScript block is empty."
    );
}
