//! Design-token guardrail for LLM-generated Angular components.
//!
//! This library is the deterministic half of the Guided Component Architect:
//! a heuristic validation engine plus the bounded self-correction loop that
//! drives a text-generation collaborator until its output passes or the
//! attempt budget runs out.
//!
//! # Pipeline
//!
//! ```text
//! generate → validate (brackets → tags → tokens → declaration) → retry or stop
//! ```
//!
//! # Heuristic, not a parser
//!
//! The linters are lexical scanners over raw fragment text. They do not
//! build a syntax tree and cannot be sound: a bracket hidden by an unusual
//! escape sequence or a tag assembled by interpolation will fool them. That
//! trade-off is deliberate - the scanners stay fast and independent of any
//! single source grammar, which is what lets one engine check TypeScript,
//! HTML and SCSS fragments alike.
//!
//! # Capability injection
//!
//! The generation service is a [`ComponentGenerator`] trait object injected
//! into [`run_correction`], never a process-wide singleton, so the loop is
//! fully testable with stub collaborators.

pub mod bundle;
pub mod correction;
pub mod lint;
pub mod outcome;
pub mod tokens;
pub mod validate;

pub use bundle::SourceBundle;
pub use correction::runner::{
    run_correction, AttemptSummary, ChatMessage, ComponentGenerator, CorrectionReport,
    GenerateError, IterationRecord, MAX_ATTEMPTS,
};
pub use correction::state::{IllegalTransition, LoopState, LoopStateMachine, TransitionRecord};
pub use outcome::{Finding, FindingKind, Fragment, ValidationOutcome};
pub use tokens::{DesignSystem, DesignTokens, TokenError, Typography};
pub use validate::validate_bundle;
