/// Vector-search retrieval module.
///
/// This module provides a synchronous HTTP client for querying a Databricks
/// Vector Search index, returning ranked context snippets with provenance.
mod client;

pub use client::{
    RetrievalError, VectorSearchClient, VectorSearchClientBuilder, VectorSearchClientTrait,
};
