//! Conversation turn history.
//!
//! An append-only transcript of the session, cleared only by an explicit
//! reset. Each answered query contributes two turns, assistant first, and
//! rendering walks the pairs most recent first. That ordering is a fixed,
//! observable contract, not an implementation accident.

use crate::models::ModelSelection;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The assistant, tagged with the model that generated the answer
    Assistant { model: ModelSelection },
    /// The visitor asking questions
    User,
}

impl Speaker {
    /// Returns the display label for this speaker.
    pub fn label(&self) -> String {
        match self {
            Self::Assistant { model } => format!("CA Wine Country Visit Assistant ({model}):"),
            Self::User => "You:".to_string(),
        }
    }

    /// Returns true for assistant turns.
    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant { .. })
    }
}

/// One displayed (speaker, text) pair in the conversation history.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    speaker: Speaker,
    text: String,
}

impl Turn {
    /// Creates a new turn.
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    /// Returns who produced the turn.
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns the speaker's display label.
    pub fn label(&self) -> String {
        self.speaker.label()
    }

    /// Returns the turn text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered sequence of turns for one session.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one answered query as a pair of turns.
    ///
    /// The assistant turn is pushed first, then the user turn that produced
    /// it. `render` relies on this pair layout.
    pub fn append(&mut self, model: ModelSelection, question: &str, answer: &str) {
        self.turns
            .push(Turn::new(Speaker::Assistant { model }, answer));
        self.turns.push(Turn::new(Speaker::User, question));
    }

    /// Clears every turn.
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    /// Lazily yields turns for display: most recent pair first,
    /// assistant-before-user within each pair.
    pub fn render(&self) -> impl Iterator<Item = &Turn> {
        self.turns.chunks(2).rev().flatten()
    }

    /// Returns the number of stored turns (two per answered query).
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true when no turns are stored.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
