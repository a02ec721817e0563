/// Vector Search HTTP client implementation.
///
/// This module provides `VectorSearchClient` for making synchronous query
/// requests against a managed vector-search index, along with error types and
/// a builder for configuration. The client only queries the index; building
/// and syncing the index belong to the ingestion pipeline.
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::models::ContextSnippet;

/// Columns requested from the index, in the order the snippet model expects.
const COLUMNS: [&str; 5] = [
    "_file",
    "_modified",
    "_fivetran_synced",
    "_chunk_index",
    "_chunk",
];

/// How many ranked chunks a query asks for by default.
const DEFAULT_NUM_RESULTS: usize = 4;

/// Errors that can occur when querying the vector-search index.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// HTTP errors with status code
    #[error("Vector search HTTP error: status {status}")]
    Http { status: u16 },

    /// Responses the index should never produce
    #[error("Vector search API error: {message}")]
    Api { message: String },

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Builder for constructing `VectorSearchClient` instances.
///
/// # Examples
///
/// ```
/// use vintner::retriever::VectorSearchClientBuilder;
///
/// let client = VectorSearchClientBuilder::new()
///     .host("https://adb-123.azuredatabricks.net")
///     .token("dapi-example")
///     .endpoint("wine_endpoint")
///     .index("wine_country.brochures_index")
///     .build()
///     .expect("Failed to create client");
/// ```
#[derive(Debug, Default)]
pub struct VectorSearchClientBuilder {
    host: Option<String>,
    token: Option<String>,
    endpoint: Option<String>,
    index: Option<String>,
    num_results: Option<usize>,
}

impl VectorSearchClientBuilder {
    /// Creates a new `VectorSearchClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workspace base URL.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the bearer token used to authenticate requests.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the vector-search endpoint name serving the index.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the fully qualified index name to query.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Sets how many ranked chunks each query requests.
    pub fn num_results(mut self, num_results: usize) -> Self {
        self.num_results = Some(num_results);
        self
    }

    /// Builds the `VectorSearchClient` with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns `RetrievalError::InvalidUrl` if the host is missing or does
    /// not parse as a URL, and `RetrievalError::Network` if the underlying
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<VectorSearchClient, RetrievalError> {
        let host = self
            .host
            .ok_or_else(|| RetrievalError::InvalidUrl("host is not set".to_string()))?;

        // Validate URL
        reqwest::Url::parse(&host)
            .map_err(|e| RetrievalError::InvalidUrl(format!("{host}: {e}")))?;

        // Create reqwest blocking client with timeout configuration
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(RetrievalError::Network)?;

        Ok(VectorSearchClient {
            client,
            host: host.trim_end_matches('/').to_string(),
            token: self.token.unwrap_or_default(),
            endpoint: self.endpoint.unwrap_or_default(),
            index: self.index.unwrap_or_default(),
            num_results: self.num_results.unwrap_or(DEFAULT_NUM_RESULTS),
        })
    }
}

/// Synchronous HTTP client for querying a Databricks Vector Search index.
///
/// Issues one query per question and maps the ranked rows into
/// `ContextSnippet`s, preserving the index's relevance order.
pub struct VectorSearchClient {
    client: reqwest::blocking::Client,
    host: String,
    token: String,
    endpoint: String,
    index: String,
    num_results: usize,
}

/// Trait for vector-search retrieval operations.
///
/// This trait enables mocking in unit tests and keeps the answer pipeline
/// independent of the concrete index client.
pub trait VectorSearchClientTrait: Send + Sync {
    /// Retrieves ranked context snippets for a question.
    ///
    /// # Errors
    ///
    /// Any failure to reach or parse the index surfaces as a
    /// `RetrievalError`; an unreachable index never degrades to an empty
    /// snippet list.
    fn retrieve(&self, question: &str) -> Result<Vec<ContextSnippet>, RetrievalError>;
}

impl VectorSearchClient {
    /// Returns the workspace base URL configured for this client.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the vector-search endpoint name.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the index name this client queries.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns how many ranked chunks each query requests.
    pub fn num_results(&self) -> usize {
        self.num_results
    }

    /// Queries the index and maps the response rows into snippets.
    fn retrieve_internal(&self, question: &str) -> Result<Vec<ContextSnippet>, RetrievalError> {
        let url = format!(
            "{}/api/2.0/vector-search/indexes/{}/query",
            self.host, self.index
        );
        let request_body = serde_json::json!({
            "query_text": question,
            "columns": COLUMNS,
            "num_results": self.num_results,
        });

        debug!(index = %self.index, endpoint = %self.endpoint, "querying vector search index");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request_body)
            .send()
            .map_err(RetrievalError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Http {
                status: status.as_u16(),
            });
        }

        let json: serde_json::Value = response.json().map_err(RetrievalError::Network)?;
        parse_snippets(&json)
    }
}

impl VectorSearchClientTrait for VectorSearchClient {
    fn retrieve(&self, question: &str) -> Result<Vec<ContextSnippet>, RetrievalError> {
        self.retrieve_internal(question)
    }
}

/// Maps a query response body into snippets.
///
/// Column positions in `result.data_array` are resolved by name from
/// `manifest.columns`; a response missing the manifest or a required column
/// is rejected rather than guessed at.
fn parse_snippets(json: &serde_json::Value) -> Result<Vec<ContextSnippet>, RetrievalError> {
    let columns = json
        .get("manifest")
        .and_then(|m| m.get("columns"))
        .and_then(|c| c.as_array())
        .ok_or_else(|| RetrievalError::Api {
            message: "Missing column manifest in query response".to_string(),
        })?;

    let position = |name: &str| -> Result<usize, RetrievalError> {
        columns
            .iter()
            .position(|c| c.get("name").and_then(|n| n.as_str()) == Some(name))
            .ok_or_else(|| RetrievalError::Api {
                message: format!("Query response is missing required column '{name}'"),
            })
    };

    let file_pos = position("_file")?;
    let modified_pos = position("_modified")?;
    let synced_pos = position("_fivetran_synced")?;
    let chunk_index_pos = position("_chunk_index")?;
    let chunk_pos = position("_chunk")?;

    let rows = json
        .get("result")
        .and_then(|r| r.get("data_array"))
        .and_then(|d| d.as_array())
        .ok_or_else(|| RetrievalError::Api {
            message: "Missing data_array in query response".to_string(),
        })?;

    let mut snippets = Vec::with_capacity(rows.len());
    for row in rows {
        let row = row.as_array().ok_or_else(|| RetrievalError::Api {
            message: "Malformed row in query response".to_string(),
        })?;

        // Chunk text is what grounds the answer; a row without it is unusable
        let text = cell_str(row, chunk_pos).ok_or_else(|| RetrievalError::Api {
            message: "Row in query response is missing chunk text".to_string(),
        })?;

        let file = cell_str(row, file_pos).unwrap_or_default();
        let modified = cell_str(row, modified_pos).and_then(ContextSnippet::parse_timestamp);
        let synced = cell_str(row, synced_pos).and_then(ContextSnippet::parse_timestamp);
        let chunk_index = row.get(chunk_index_pos).and_then(cell_i64);

        snippets.push(ContextSnippet::new(file, modified, synced, chunk_index, text));
    }

    Ok(snippets)
}

/// Reads a row cell as a string.
fn cell_str(row: &[serde_json::Value], index: usize) -> Option<&str> {
    row.get(index).and_then(|v| v.as_str())
}

/// Reads a numeric cell that the index may serialize as a number or string.
fn cell_i64(value: &serde_json::Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_response(rows: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "manifest": {
                "column_count": 6,
                "columns": [
                    {"name": "_file"},
                    {"name": "_modified"},
                    {"name": "_fivetran_synced"},
                    {"name": "_chunk_index"},
                    {"name": "_chunk"},
                    {"name": "score"}
                ]
            },
            "result": {
                "row_count": rows.as_array().map_or(0, Vec::len),
                "data_array": rows
            }
        })
    }

    #[test]
    fn builder_requires_a_host() {
        let result = VectorSearchClientBuilder::new().build();
        assert!(matches!(result, Err(RetrievalError::InvalidUrl(_))));
    }

    #[test]
    fn builder_rejects_invalid_host_url() {
        let result = VectorSearchClientBuilder::new()
            .host("not-a-valid-url")
            .build();
        assert!(matches!(result, Err(RetrievalError::InvalidUrl(_))));
    }

    #[test]
    fn builder_configures_endpoint_index_and_budget() {
        let client = VectorSearchClientBuilder::new()
            .host("https://adb-123.azuredatabricks.net/")
            .token("dapi-example")
            .endpoint("wine_endpoint")
            .index("wine_country.brochures_index")
            .num_results(7)
            .build()
            .expect("valid configuration");

        assert_eq!(client.host(), "https://adb-123.azuredatabricks.net");
        assert_eq!(client.endpoint(), "wine_endpoint");
        assert_eq!(client.index(), "wine_country.brochures_index");
        assert_eq!(client.num_results(), 7);
    }

    #[test]
    fn default_result_budget_matches_retriever_default() {
        let client = VectorSearchClientBuilder::new()
            .host("https://adb-123.azuredatabricks.net")
            .build()
            .expect("valid configuration");
        assert_eq!(client.num_results(), DEFAULT_NUM_RESULTS);
    }

    #[test]
    fn parse_snippets_preserves_row_order_and_metadata() {
        let json = query_response(serde_json::json!([
            ["napa.txt", "2024-05-01T12:00:00Z", "2024-05-02T00:00:00Z", 0, "Winery A is in Napa...", 0.91],
            ["sonoma.txt", "2024-04-10T08:30:00Z", "2024-05-02T00:00:00Z", 3, "Winery B is in Sonoma...", 0.77]
        ]));

        let snippets = parse_snippets(&json).expect("well-formed response");
        assert_eq!(snippets.len(), 2);

        assert_eq!(snippets[0].file(), "napa.txt");
        assert_eq!(snippets[0].chunk_index(), Some(0));
        assert_eq!(snippets[0].text(), "Winery A is in Napa...");
        assert!(snippets[0].modified().is_some());
        assert!(snippets[0].synced().is_some());

        assert_eq!(snippets[1].file(), "sonoma.txt");
        assert_eq!(snippets[1].chunk_index(), Some(3));
        assert_eq!(snippets[1].text(), "Winery B is in Sonoma...");
    }

    #[test]
    fn parse_snippets_accepts_stringly_typed_chunk_index() {
        let json = query_response(serde_json::json!([
            ["napa.txt", "2024-05-01T12:00:00Z", "2024-05-02T00:00:00Z", "5", "chunk text", 0.5]
        ]));

        let snippets = parse_snippets(&json).expect("well-formed response");
        assert_eq!(snippets[0].chunk_index(), Some(5));
    }

    #[test]
    fn parse_snippets_tolerates_unparseable_timestamps() {
        let json = query_response(serde_json::json!([
            ["napa.txt", "yesterday", serde_json::Value::Null, 1, "chunk text", 0.5]
        ]));

        let snippets = parse_snippets(&json).expect("well-formed response");
        assert!(snippets[0].modified().is_none());
        assert!(snippets[0].synced().is_none());
        assert_eq!(snippets[0].text(), "chunk text");
    }

    #[test]
    fn parse_snippets_rejects_missing_manifest() {
        let json = serde_json::json!({
            "result": { "data_array": [] }
        });

        let err = parse_snippets(&json).expect_err("manifest is required");
        assert!(matches!(err, RetrievalError::Api { .. }));
    }

    #[test]
    fn parse_snippets_rejects_missing_required_column() {
        let json = serde_json::json!({
            "manifest": {
                "columns": [
                    {"name": "_file"},
                    {"name": "_chunk"}
                ]
            },
            "result": { "data_array": [] }
        });

        let err = parse_snippets(&json).expect_err("column set is incomplete");
        match err {
            RetrievalError::Api { message } => {
                assert!(message.contains("_modified"));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn parse_snippets_rejects_row_without_chunk_text() {
        let json = query_response(serde_json::json!([
            ["napa.txt", "2024-05-01T12:00:00Z", "2024-05-02T00:00:00Z", 0, serde_json::Value::Null, 0.9]
        ]));

        let err = parse_snippets(&json).expect_err("chunk text is required");
        assert!(matches!(err, RetrievalError::Api { .. }));
    }

    #[test]
    fn parse_snippets_of_empty_result_is_empty() {
        let json = query_response(serde_json::json!([]));
        let snippets = parse_snippets(&json).expect("empty result is well-formed");
        assert!(snippets.is_empty());
    }

    #[test]
    fn http_error_variant_with_status_code() {
        let err = RetrievalError::Http { status: 503 };
        let message = format!("{err}");
        assert!(message.contains("Vector search HTTP error"));
        assert!(message.contains("503"));
    }

    #[test]
    fn trait_can_be_implemented_by_mock_struct() {
        struct MockRetriever;

        impl VectorSearchClientTrait for MockRetriever {
            fn retrieve(&self, _question: &str) -> Result<Vec<ContextSnippet>, RetrievalError> {
                Ok(vec![ContextSnippet::new("f", None, None, Some(0), "text")])
            }
        }

        let snippets = MockRetriever.retrieve("anything").unwrap();
        assert_eq!(snippets.len(), 1);
    }
}
