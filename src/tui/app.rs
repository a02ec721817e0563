use crate::controller::{Controller, SubmitOutcome};
use crate::session::Session;

/// Application state for the TUI.
///
/// Wraps the visitor session and its controller, and adds the purely visual
/// state: panel focus, transcript scroll, the thinking indicator, and the
/// current warning notice.
pub struct App {
    controller: Controller,
    session: Session,
    /// Currently focused panel
    focus: Focus,
    /// Recoverable warning from the last failed submission
    notice: Option<String>,
    /// True while a submission is blocking on the pipeline
    thinking: bool,
    /// Scroll offset for the conversation panel
    history_scroll: u16,
}

/// Panel focus state for keyboard navigation.
///
/// Determines which panel receives keyboard input and how keys are
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Question input bar is focused (typing edits the pending question)
    Input,
    /// Model picker and context toggle are focused (j/k cycles, Space
    /// toggles)
    Sidebar,
    /// Conversation transcript is focused (j/k scrolls)
    Conversation,
}

impl App {
    /// Creates the app over a controller and a session.
    ///
    /// Default focus is `Input`; a visitor should be able to type
    /// immediately.
    pub fn new(controller: Controller, session: Session) -> Self {
        Self {
            controller,
            session,
            focus: Focus::Input,
            notice: None,
            thinking: false,
            history_scroll: 0,
        }
    }

    /// Returns the visitor session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the current focus state.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Cycles focus forward: input, sidebar, conversation.
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Sidebar,
            Focus::Sidebar => Focus::Conversation,
            Focus::Conversation => Focus::Input,
        };
    }

    /// Cycles focus backward.
    pub fn prev_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Conversation,
            Focus::Sidebar => Focus::Input,
            Focus::Conversation => Focus::Sidebar,
        };
    }

    /// Returns focus to the question input.
    pub fn reset_focus(&mut self) {
        self.focus = Focus::Input;
    }

    /// Appends a character to the pending question.
    pub fn push_input_char(&mut self, c: char) {
        self.session.push_question_char(c);
    }

    /// Removes the last character of the pending question.
    pub fn pop_input_char(&mut self) {
        self.session.pop_question_char();
    }

    /// True when the pending question has any non-whitespace content.
    pub fn has_pending_question(&self) -> bool {
        !self.session.pending_question().trim().is_empty()
    }

    /// Submits the pending question through the controller.
    ///
    /// Blocks until the pipeline completes. On success the notice clears
    /// and the transcript scrolls back to the newest pair; on failure the
    /// warning becomes the current notice and the transcript is untouched.
    pub fn submit(&mut self) {
        match self.controller.submit(&mut self.session) {
            SubmitOutcome::Answered => {
                self.notice = None;
                self.history_scroll = 0;
            }
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Failed(warning) => {
                self.notice = Some(warning);
            }
        }
    }

    /// Clears the conversation, keeping the model and context settings.
    pub fn reset_conversation(&mut self) {
        self.controller.reset(&mut self.session);
        self.notice = None;
        self.history_scroll = 0;
    }

    /// Flips the context toggle.
    pub fn toggle_context(&mut self) {
        self.session.toggle_use_context();
    }

    /// Selects the next model in picker order.
    pub fn select_next_model(&mut self) {
        self.session.select_next_model();
    }

    /// Selects the previous model in picker order.
    pub fn select_previous_model(&mut self) {
        self.session.select_previous_model();
    }

    /// Returns the current warning notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Returns true while a submission is in flight.
    pub fn thinking(&self) -> bool {
        self.thinking
    }

    /// Sets the thinking indicator.
    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }

    /// Returns the conversation scroll offset.
    pub fn history_scroll(&self) -> u16 {
        self.history_scroll
    }

    /// Scrolls the conversation down.
    pub fn scroll_history_down(&mut self, lines: u16) {
        self.history_scroll = self.history_scroll.saturating_add(lines);
    }

    /// Scrolls the conversation up.
    pub fn scroll_history_up(&mut self, lines: u16) {
        self.history_scroll = self.history_scroll.saturating_sub(lines);
    }

    #[cfg(test)]
    pub(crate) fn set_notice_for_test(&mut self, notice: &str) {
        self.notice = Some(notice.to_string());
    }
}
