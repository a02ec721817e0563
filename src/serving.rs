/// Model serving gateway module.
///
/// This module provides a synchronous HTTP client for the hosted model
/// serving gateway's chat-completions surface, including error types and a
/// builder pattern for configuration.
mod client;

pub use client::{ServingClient, ServingClientBuilder, ServingClientTrait, ServingError};
