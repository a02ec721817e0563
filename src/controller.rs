//! Interaction control: from a submitted question to an updated session.
//!
//! The controller is the only mutator of conversation state. Pipeline
//! failures stop at this boundary as recoverable warnings; nothing partial
//! ever reaches the history.

use tracing::{info, warn};

use crate::answerer::Answerer;
use crate::session::Session;

/// What happened to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The pipeline answered and the turn pair was appended
    Answered,
    /// The question was blank; nothing was invoked
    Ignored,
    /// The pipeline failed; the warning is user-visible and history is
    /// unchanged
    Failed(String),
}

/// Drives the answer pipeline against a session.
pub struct Controller {
    answerer: Answerer,
}

impl Controller {
    /// Creates a controller over the given pipeline.
    pub fn new(answerer: Answerer) -> Self {
        Self { answerer }
    }

    /// Submits the session's pending question.
    ///
    /// Takes the pending question out of the session; a blank question is a
    /// no-op, not an error. On success the answer/question pair is appended
    /// to the history. On failure the history is left untouched and the
    /// error message comes back as a recoverable warning.
    pub fn submit(&self, session: &mut Session) -> SubmitOutcome {
        let question = session.take_question();
        let question = question.trim();
        if question.is_empty() {
            return SubmitOutcome::Ignored;
        }

        info!(model = %session.model(), use_context = session.use_context(), "submitting question");

        match self
            .answerer
            .answer(session.use_context(), session.model(), question)
        {
            Ok(answer) => {
                let model = session.model();
                session.history_mut().append(model, question, &answer);
                SubmitOutcome::Answered
            }
            Err(e) => {
                warn!(error = %e, "question processing failed");
                SubmitOutcome::Failed(format!(
                    "An error occurred while processing your question: {e}"
                ))
            }
        }
    }

    /// Resets the session's conversation, preserving its configuration.
    pub fn reset(&self, session: &mut Session) {
        info!("resetting conversation");
        session.reset();
    }
}
