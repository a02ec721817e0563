//! Startup configuration for the assistant.
//!
//! All four settings are required before any client is constructed: the
//! workspace host, an access token, and the vector-search endpoint and index
//! names. A missing or invalid value fails startup outright rather than
//! letting the assistant run without grounding.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty
    #[error("Missing required environment variable: {name}")]
    MissingVar { name: &'static str },

    /// The workspace host is not a valid URL
    #[error("Invalid workspace host URL: {0}")]
    InvalidHost(String),
}

/// Connection settings shared by the retriever and serving clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    /// Workspace base URL, without a trailing slash
    host: String,
    /// Personal access token used as a bearer credential
    token: String,
    /// Vector-search endpoint name
    vs_endpoint: String,
    /// Vector-search index name
    vs_index: String,
}

impl AssistantConfig {
    /// Environment variable holding the workspace host URL.
    pub const ENV_HOST: &'static str = "DATABRICKS_HOST";
    /// Environment variable holding the access token.
    pub const ENV_TOKEN: &'static str = "DATABRICKS_TOKEN";
    /// Environment variable holding the vector-search endpoint name.
    pub const ENV_VS_ENDPOINT: &'static str = "VS_ENDPOINT";
    /// Environment variable holding the vector-search index name.
    pub const ENV_VS_INDEX: &'static str = "VS_INDEX";

    /// Creates a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHost` if the host does not parse as a URL.
    pub fn new(
        host: impl Into<String>,
        token: impl Into<String>,
        vs_endpoint: impl Into<String>,
        vs_index: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let host = normalize_host(host.into())?;
        Ok(Self {
            host,
            token: token.into(),
            vs_endpoint: vs_endpoint.into(),
            vs_index: vs_index.into(),
        })
    }

    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present
    /// (existing process variables win). Each required variable must be set
    /// and non-blank.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` naming the first absent or blank
    /// variable, or `ConfigError::InvalidHost` if the host does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Best effort; absence of a .env file is not an error
        let _ = dotenvy::dotenv();

        let host = require_var(Self::ENV_HOST)?;
        let token = require_var(Self::ENV_TOKEN)?;
        let vs_endpoint = require_var(Self::ENV_VS_ENDPOINT)?;
        let vs_index = require_var(Self::ENV_VS_INDEX)?;

        Self::new(host, token, vs_endpoint, vs_index)
    }

    /// Returns the workspace base URL, without a trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the access token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the vector-search endpoint name.
    pub fn vs_endpoint(&self) -> &str {
        &self.vs_endpoint
    }

    /// Returns the vector-search index name.
    pub fn vs_index(&self) -> &str {
        &self.vs_index
    }
}

/// Reads a required environment variable, rejecting blank values.
fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingVar { name }),
    }
}

/// Validates the host as a URL and strips any trailing slash.
fn normalize_host(host: String) -> Result<String, ConfigError> {
    reqwest::Url::parse(&host).map_err(|e| ConfigError::InvalidHost(format!("{host}: {e}")))?;
    Ok(host.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_all_vars() {
        unsafe {
            std::env::set_var(AssistantConfig::ENV_HOST, "https://adb-123.azuredatabricks.net");
            std::env::set_var(AssistantConfig::ENV_TOKEN, "dapi-test-token");
            std::env::set_var(AssistantConfig::ENV_VS_ENDPOINT, "wine_endpoint");
            std::env::set_var(AssistantConfig::ENV_VS_INDEX, "wine_country.brochures_index");
        }
    }

    fn clear_all_vars() {
        unsafe {
            std::env::remove_var(AssistantConfig::ENV_HOST);
            std::env::remove_var(AssistantConfig::ENV_TOKEN);
            std::env::remove_var(AssistantConfig::ENV_VS_ENDPOINT);
            std::env::remove_var(AssistantConfig::ENV_VS_INDEX);
        }
    }

    #[test]
    #[serial]
    fn from_env_reads_all_four_variables() {
        set_all_vars();

        let config = AssistantConfig::from_env().expect("config should load");
        assert_eq!(config.host(), "https://adb-123.azuredatabricks.net");
        assert_eq!(config.token(), "dapi-test-token");
        assert_eq!(config.vs_endpoint(), "wine_endpoint");
        assert_eq!(config.vs_index(), "wine_country.brochures_index");

        clear_all_vars();
    }

    #[test]
    #[serial]
    fn from_env_names_the_missing_variable() {
        set_all_vars();
        unsafe {
            std::env::remove_var(AssistantConfig::ENV_VS_INDEX);
        }

        let err = AssistantConfig::from_env().expect_err("index is missing");
        assert!(matches!(
            err,
            ConfigError::MissingVar { name } if name == AssistantConfig::ENV_VS_INDEX
        ));

        clear_all_vars();
    }

    #[test]
    #[serial]
    fn from_env_rejects_blank_values() {
        set_all_vars();
        unsafe {
            std::env::set_var(AssistantConfig::ENV_TOKEN, "   ");
        }

        let err = AssistantConfig::from_env().expect_err("blank token is missing");
        assert!(matches!(
            err,
            ConfigError::MissingVar { name } if name == AssistantConfig::ENV_TOKEN
        ));

        clear_all_vars();
    }

    #[test]
    fn new_rejects_invalid_host_url() {
        let result = AssistantConfig::new("not-a-valid-url", "token", "endpoint", "index");
        assert!(matches!(result, Err(ConfigError::InvalidHost(_))));
    }

    #[test]
    fn new_strips_trailing_slash_from_host() {
        let config = AssistantConfig::new(
            "https://adb-123.azuredatabricks.net/",
            "token",
            "endpoint",
            "index",
        )
        .expect("valid config");
        assert_eq!(config.host(), "https://adb-123.azuredatabricks.net");
    }
}
