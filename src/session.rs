//! Per-session mutable state.
//!
//! Everything a single visitor session owns lives here: the conversation
//! history, the context toggle, the model selection, and the pending
//! question being typed. A server deployment would key one `Session` per
//! visitor; nothing in it is shared.

use crate::conversation::ConversationHistory;
use crate::models::ModelSelection;

/// Mutable state for one visitor session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    history: ConversationHistory,
    use_context: bool,
    model: ModelSelection,
    pending_question: String,
}

impl Session {
    /// Creates a fresh session: empty history, context disabled, default
    /// model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the conversation history.
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Returns the conversation history for mutation.
    pub fn history_mut(&mut self) -> &mut ConversationHistory {
        &mut self.history
    }

    /// Returns whether retrieval context is enabled.
    pub fn use_context(&self) -> bool {
        self.use_context
    }

    /// Sets the context toggle.
    pub fn set_use_context(&mut self, use_context: bool) {
        self.use_context = use_context;
    }

    /// Flips the context toggle.
    pub fn toggle_use_context(&mut self) {
        self.use_context = !self.use_context;
    }

    /// Returns the currently selected model.
    pub fn model(&self) -> ModelSelection {
        self.model
    }

    /// Sets the model selection.
    pub fn set_model(&mut self, model: ModelSelection) {
        self.model = model;
    }

    /// Moves the model selection forward through the picker order.
    pub fn select_next_model(&mut self) {
        self.model = self.model.next();
    }

    /// Moves the model selection backward through the picker order.
    pub fn select_previous_model(&mut self) {
        self.model = self.model.previous();
    }

    /// Returns the question being typed.
    pub fn pending_question(&self) -> &str {
        &self.pending_question
    }

    /// Appends a character to the pending question.
    pub fn push_question_char(&mut self, c: char) {
        self.pending_question.push(c);
    }

    /// Removes the last character of the pending question.
    pub fn pop_question_char(&mut self) {
        self.pending_question.pop();
    }

    /// Replaces the pending question wholesale.
    pub fn set_pending_question(&mut self, question: impl Into<String>) {
        self.pending_question = question.into();
    }

    /// Takes the pending question, leaving the buffer empty.
    pub fn take_question(&mut self) -> String {
        std::mem::take(&mut self.pending_question)
    }

    /// Clears the conversation and pending question.
    ///
    /// The context toggle and model selection survive a reset; resetting
    /// the conversation does not reset configuration.
    pub fn reset(&mut self) {
        self.history.reset();
        self.pending_question.clear();
    }
}
