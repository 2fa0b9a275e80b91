//! Multi-turn session state: component slug and conversation history.

use std::sync::LazyLock;

use regex::Regex;

use guardrail::ChatMessage;

static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

const SLUG_MAX_LEN: usize = 45;

/// Derive a filesystem-safe slug from a component description.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let slug = NON_SLUG.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    // Replacement leaves only ASCII [a-z0-9-], so byte slicing is safe.
    let truncated = &slug[..slug.len().min(SLUG_MAX_LEN)];
    truncated.trim_end_matches('-').to_string()
}

/// Conversation state carried across the turns of an interactive session.
///
/// The slug is locked after the first successful generation so follow-up
/// edits keep writing over the same component files instead of spawning a
/// new set per prompt.
#[derive(Debug, Default)]
pub struct SessionState {
    slug: Option<String>,
    history: Vec<ChatMessage>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for this run: the locked slug on follow-ups, otherwise a fresh
    /// one derived from the description.
    pub fn resolve_slug(&self, description: &str) -> String {
        self.slug
            .clone()
            .unwrap_or_else(|| slugify(description))
    }

    pub fn is_followup(&self) -> bool {
        self.slug.is_some()
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Lock the slug after the first generation. Later calls are no-ops.
    pub fn lock_slug(&mut self, slug: &str) {
        if self.slug.is_none() {
            self.slug = Some(slug.to_string());
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Record a completed turn: the user description and the raw assistant
    /// transcript it produced.
    pub fn record_turn(&mut self, description: &str, raw_response: &str) {
        self.history.push(ChatMessage::user(description));
        self.history.push(ChatMessage::assistant(raw_response));
    }

    /// Drop history and slug; the next prompt starts a new component.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(
            slugify("A login card with glassmorphism!"),
            "a-login-card-with-glassmorphism"
        );
        assert_eq!(slugify("  Nav / Bar  "), "nav-bar");
    }

    #[test]
    fn test_slugify_truncates_without_trailing_dash() {
        let long = "a very descriptive component name that just keeps going on and on";
        let slug = slugify(long);
        assert!(slug.len() <= 45);
        assert!(!slug.ends_with('-'));
        assert_eq!(slug, "a-very-descriptive-component-name-that-just-k");

        // Truncation landing on a separator must not leave a trailing dash.
        assert_eq!(
            slugify("an extremely long component description that goes far"),
            "an-extremely-long-component-description-that"
        );
    }

    #[test]
    fn test_slugify_non_ascii_collapses() {
        assert_eq!(slugify("café menü card"), "caf-men-card");
    }

    #[test]
    fn test_slug_locking_and_followups() {
        let mut session = SessionState::new();
        assert!(!session.is_followup());
        assert_eq!(session.resolve_slug("A login card"), "a-login-card");

        session.lock_slug("a-login-card");
        assert!(session.is_followup());
        // Follow-up prompts keep the original slug.
        assert_eq!(
            session.resolve_slug("Make the button rounder"),
            "a-login-card"
        );
        // A second lock does not override.
        session.lock_slug("something-else");
        assert_eq!(session.slug(), Some("a-login-card"));
    }

    #[test]
    fn test_record_turn_appends_user_then_assistant() {
        let mut session = SessionState::new();
        session.record_turn("a card", "<<<TS>>>x<<<END_TS>>>");
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].role, "user");
        assert_eq!(session.history()[1].role, "assistant");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = SessionState::new();
        session.lock_slug("a-card");
        session.record_turn("a card", "raw");
        session.reset();
        assert!(!session.is_followup());
        assert!(session.history().is_empty());
    }
}
