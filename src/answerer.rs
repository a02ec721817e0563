//! The two-branch answer pipeline.
//!
//! This module provides the `Answerer` struct which combines the retriever,
//! the prompt composer, and the serving client into the flow that turns one
//! question into one answer.

mod pipeline;

pub use pipeline::{AnswerError, Answerer, AnswererBuilder};
