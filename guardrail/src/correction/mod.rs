//! Bounded self-correction: generate → validate → retry with the
//! validator's error list, retaining the best attempt seen.
//!
//! The attempt budget is fixed at [`runner::MAX_ATTEMPTS`]; error severity
//! never extends it. Only errors are forwarded to the next generation
//! request - warnings would dilute the corrective prompt without blocking
//! a pass.

pub mod runner;
pub mod state;

pub use runner::{
    run_correction, AttemptSummary, ChatMessage, ComponentGenerator, CorrectionReport,
    GenerateError, IterationRecord, MAX_ATTEMPTS,
};
pub use state::{IllegalTransition, LoopState, LoopStateMachine, TransitionRecord};
