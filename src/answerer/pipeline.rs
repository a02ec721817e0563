//! Answer pipeline implementation.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::ModelSelection;
use crate::prompt;
use crate::retriever::{RetrievalError, VectorSearchClientTrait};
use crate::serving::{ServingClientTrait, ServingError};

/// Errors surfaced by one pipeline invocation.
///
/// Both variants are recoverable at the controller boundary: the process
/// keeps running, history stays untouched, and the user may retry.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// The vector-search index was unreachable or misconfigured.
    ///
    /// Raised before any generation attempt; context-enabled questions are
    /// never answered from an empty context.
    #[error("Retrieval unavailable: {0}")]
    RetrievalUnavailable(#[from] RetrievalError),

    /// The serving gateway was unreachable, rejected the request, or the
    /// model itself failed.
    #[error("Generation failed: {0}")]
    GenerationFailed(#[from] ServingError),
}

/// Builder for constructing `Answerer` instances.
#[derive(Default)]
pub struct AnswererBuilder {
    retriever: Option<Arc<dyn VectorSearchClientTrait>>,
    client: Option<Arc<dyn ServingClientTrait>>,
}

impl AnswererBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the vector-search client to retrieve context with.
    pub fn retriever(mut self, retriever: Arc<dyn VectorSearchClientTrait>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Sets the serving client to generate answers with.
    pub fn client(mut self, client: Arc<dyn ServingClientTrait>) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the `Answerer`.
    ///
    /// # Panics
    ///
    /// Panics if `retriever()` or `client()` was not called.
    #[must_use]
    pub fn build(self) -> Answerer {
        Answerer {
            retriever: self
                .retriever
                .expect("retriever must be set via retriever() method"),
            client: self.client.expect("client must be set via client() method"),
        }
    }
}

/// Turns one question into one answer.
///
/// Two exclusive paths, selected per call: with context, the question goes
/// through retrieval and prompt composition before generation; without, the
/// raw question goes straight to the model and the retriever is never
/// touched. Each invocation is independent; the model sees no conversation
/// history.
pub struct Answerer {
    retriever: Arc<dyn VectorSearchClientTrait>,
    client: Arc<dyn ServingClientTrait>,
}

impl Answerer {
    /// Creates a new `Answerer` over the given clients.
    #[must_use]
    pub fn new(
        retriever: Arc<dyn VectorSearchClientTrait>,
        client: Arc<dyn ServingClientTrait>,
    ) -> Self {
        Self { retriever, client }
    }

    /// Answers a question, optionally grounding it in retrieved context.
    ///
    /// # Arguments
    ///
    /// * `use_context` - Whether to retrieve brochure chunks and compose the
    ///   grounded prompt, or forward the raw question
    /// * `model` - Which foundation model answers
    /// * `question` - The visitor's question for this turn
    ///
    /// # Errors
    ///
    /// `AnswerError::RetrievalUnavailable` if context was requested and the
    /// index failed; the pipeline never falls back to an ungrounded answer.
    /// `AnswerError::GenerationFailed` if the gateway call failed.
    pub fn answer(
        &self,
        use_context: bool,
        model: ModelSelection,
        question: &str,
    ) -> Result<String, AnswerError> {
        info!(%model, use_context, "answering question");

        if use_context {
            let snippets = self.retriever.retrieve(question)?;
            for snippet in &snippets {
                debug!(provenance = %snippet.provenance(), "retrieved context chunk");
            }

            let composed = prompt::compose(&snippets, question);
            Ok(self.client.generate(model.as_str(), &composed)?)
        } else {
            Ok(self.client.generate(model.as_str(), question)?)
        }
    }
}
