pub mod answerer;
pub mod config;
pub mod controller;
pub mod conversation;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod retriever;
pub mod serving;
pub mod session;
pub mod tui;

pub use answerer::{AnswerError, Answerer, AnswererBuilder};
pub use config::{AssistantConfig, ConfigError};
pub use controller::{Controller, SubmitOutcome};
pub use conversation::{ConversationHistory, Speaker, Turn};
pub use models::{ContextSnippet, ModelSelection};
pub use retriever::{
    RetrievalError, VectorSearchClient, VectorSearchClientBuilder, VectorSearchClientTrait,
};
pub use serving::{ServingClient, ServingClientBuilder, ServingClientTrait, ServingError};
pub use session::Session;
