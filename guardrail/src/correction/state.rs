//! Self-correction loop state machine - explicit states and legal
//! transition guards.
//!
//! The loop driver calls `advance()` to move between states. Each call
//! validates that the transition is legal and records it, so a finished run
//! carries an auditable trace of exactly what happened.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The set of loop states.
///
/// Every run starts at `Initial` and terminates at either `DonePass` or
/// `DoneExhausted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    /// Constructed, no attempt started.
    Initial,
    /// Calling the generation collaborator.
    Generating,
    /// Running the validation engine on the returned bundle.
    Validating,
    /// Validation passed - terminal state.
    DonePass,
    /// Attempt budget exhausted with errors remaining - terminal state.
    DoneExhausted,
}

impl LoopState {
    /// Whether this is a terminal state (no further transitions allowed).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::DonePass | Self::DoneExhausted)
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "Initial"),
            Self::Generating => write!(f, "Generating"),
            Self::Validating => write!(f, "Validating"),
            Self::DonePass => write!(f, "DonePass"),
            Self::DoneExhausted => write!(f, "DoneExhausted"),
        }
    }
}

/// Legal transitions between loop states:
/// ```text
/// Initial → Generating
/// Generating → Validating
/// Validating → Generating | DonePass | DoneExhausted
/// ```
fn is_legal_transition(from: LoopState, to: LoopState) -> bool {
    use LoopState::*;

    matches!(
        (from, to),
        (Initial, Generating)
            | (Generating, Validating)
            | (Validating, Generating)
            | (Validating, DonePass)
            | (Validating, DoneExhausted)
    )
}

/// A single recorded state transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: LoopState,
    pub to: LoopState,
    /// Attempt number at the time of transition (0 before the first cycle).
    pub attempt: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Error returned when an illegal transition is attempted.
#[derive(Debug, Clone)]
pub struct IllegalTransition {
    pub from: LoopState,
    pub to: LoopState,
}

impl fmt::Display for IllegalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Illegal loop transition: {} -> {}", self.from, self.to)
    }
}

impl std::error::Error for IllegalTransition {}

/// Tracks the current state, enforces legal transitions, and keeps the
/// transition log for diagnostics.
#[derive(Debug)]
pub struct LoopStateMachine {
    current: LoopState,
    attempt: u32,
    transitions: Vec<TransitionRecord>,
}

impl LoopStateMachine {
    pub fn new() -> Self {
        Self {
            current: LoopState::Initial,
            attempt: 0,
            transitions: Vec::new(),
        }
    }

    pub fn current(&self) -> LoopState {
        self.current
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Set the attempt counter (called by the loop driver each cycle).
    pub fn set_attempt(&mut self, attempt: u32) {
        self.attempt = attempt;
    }

    /// Attempt to advance to the next state.
    pub fn advance(
        &mut self,
        to: LoopState,
        reason: Option<&str>,
    ) -> Result<(), IllegalTransition> {
        if !is_legal_transition(self.current, to) {
            return Err(IllegalTransition {
                from: self.current,
                to,
            });
        }

        tracing::debug!(
            from = %self.current,
            to = %to,
            attempt = self.attempt,
            "loop transition"
        );

        self.transitions.push(TransitionRecord {
            from: self.current,
            to,
            attempt: self.attempt,
            reason: reason.map(String::from),
        });
        self.current = to;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.current.is_terminal()
    }

    /// The full transition log.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }
}

impl Default for LoopStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let sm = LoopStateMachine::new();
        assert_eq!(sm.current(), LoopState::Initial);
        assert!(!sm.is_terminal());
        assert!(sm.transitions().is_empty());
    }

    #[test]
    fn test_pass_on_first_attempt() {
        let mut sm = LoopStateMachine::new();
        sm.set_attempt(1);
        sm.advance(LoopState::Generating, None).unwrap();
        sm.advance(LoopState::Validating, None).unwrap();
        sm.advance(LoopState::DonePass, Some("validation passed"))
            .unwrap();

        assert!(sm.is_terminal());
        assert_eq!(sm.transitions().len(), 3);
        assert_eq!(
            sm.transitions()[2].reason.as_deref(),
            Some("validation passed")
        );
    }

    #[test]
    fn test_retry_cycles_then_exhaustion() {
        let mut sm = LoopStateMachine::new();
        for attempt in 1..=3 {
            sm.set_attempt(attempt);
            sm.advance(LoopState::Generating, None).unwrap();
            sm.advance(LoopState::Validating, None).unwrap();
        }
        sm.advance(LoopState::DoneExhausted, Some("attempt budget exhausted"))
            .unwrap();

        assert_eq!(sm.current(), LoopState::DoneExhausted);
        assert!(sm.is_terminal());
        // 3 × (generate, validate) + terminal transition.
        assert_eq!(sm.transitions().len(), 7);
        assert_eq!(sm.transitions()[2].attempt, 2);
    }

    #[test]
    fn test_illegal_skip_transition() {
        let mut sm = LoopStateMachine::new();
        let err = sm.advance(LoopState::Validating, None).unwrap_err();
        assert_eq!(err.from, LoopState::Initial);
        assert_eq!(err.to, LoopState::Validating);
    }

    #[test]
    fn test_cannot_leave_terminal_state() {
        let mut sm = LoopStateMachine::new();
        sm.advance(LoopState::Generating, None).unwrap();
        sm.advance(LoopState::Validating, None).unwrap();
        sm.advance(LoopState::DonePass, None).unwrap();

        assert!(sm.advance(LoopState::Generating, None).is_err());
        assert!(sm.advance(LoopState::DoneExhausted, None).is_err());
    }

    #[test]
    fn test_cannot_terminate_without_validating() {
        let mut sm = LoopStateMachine::new();
        sm.advance(LoopState::Generating, None).unwrap();
        assert!(sm.advance(LoopState::DonePass, None).is_err());
        assert!(sm.advance(LoopState::DoneExhausted, None).is_err());
    }

    #[test]
    fn test_transition_record_serde() {
        let record = TransitionRecord {
            from: LoopState::Validating,
            to: LoopState::DoneExhausted,
            attempt: 3,
            reason: Some("attempt budget exhausted".into()),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("done_exhausted"));
        let restored: TransitionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.to, LoopState::DoneExhausted);
        assert_eq!(restored.attempt, 3);
    }
}
