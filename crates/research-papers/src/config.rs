//! Configuration for the research paper service.

use std::time::Duration;

use anyhow::Context;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Semantic Scholar Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Public paper page prefix, used to derive URLs from paper IDs.
    pub const PAPER_PAGE: &str = "https://www.semanticscholar.org/paper";

    /// OpenAI-compatible completion endpoint.
    pub const LLM_API: &str = "https://api.openai.com/v1";

    /// Default completion model.
    pub const LLM_MODEL: &str = "gpt-4o-mini";

    /// Sampling temperature for summaries and insights.
    pub const LLM_TEMPERATURE: f32 = 0.3;

    /// Output token cap per completion.
    pub const LLM_MAX_TOKENS: u32 = 512;

    /// Search request timeout.
    pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

    /// Completion request timeout.
    pub const LLM_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum idle connections per host.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Idle connection expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Field selections for Semantic Scholar search requests.
pub mod fields {
    /// Everything the normalizer reads.
    pub const SEARCH: &[&str] =
        &["paperId", "title", "abstract", "url", "year", "authors", "citationCount"];
}

/// Service configuration.
#[derive(Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional).
    pub search_api_key: Option<String>,

    /// Base URL for the Graph API (for testing with mock servers).
    pub search_api_url: String,

    /// Completion API key (optional for self-hosted endpoints).
    pub llm_api_key: Option<String>,

    /// Base URL for the completion API.
    pub llm_api_url: String,

    /// Model identifier sent with every completion request.
    pub llm_model: String,

    /// Search request timeout.
    pub search_timeout: Duration,

    /// Completion request timeout.
    pub llm_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Number of papers augmented in parallel.
    pub augment_concurrency: usize,
}

impl Config {
    /// Create a configuration with the given API keys and default endpoints.
    #[must_use]
    pub fn new(search_api_key: Option<String>, llm_api_key: Option<String>) -> Self {
        Self {
            search_api_key,
            search_api_url: api::GRAPH_API.to_string(),
            llm_api_key,
            llm_api_url: api::LLM_API.to_string(),
            llm_model: api::LLM_MODEL.to_string(),
            search_timeout: api::SEARCH_TIMEOUT,
            llm_timeout: api::LLM_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            augment_concurrency: 1,
        }
    }

    /// Create a test configuration pointing both providers at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            search_api_key: None,
            search_api_url: format!("{}/graph/v1", base_url),
            llm_api_key: Some("test-key".to_string()),
            llm_api_url: format!("{}/v1", base_url),
            llm_model: "test-model".to_string(),
            search_timeout: Duration::from_secs(5),
            llm_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            augment_concurrency: 1,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from a variable lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is malformed or the result fails [`Config::validate`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(var("SEMANTIC_SCHOLAR_API_KEY"), var("OPENAI_API_KEY"));

        if let Some(url) = var("SEMANTIC_SCHOLAR_API_URL") {
            config.search_api_url = url;
        }
        if let Some(url) = var("LLM_API_URL") {
            config.llm_api_url = url;
        }
        if let Some(model) = var("LLM_MODEL") {
            config.llm_model = model;
        }
        if let Some(raw) = var("AUGMENT_CONCURRENCY") {
            config.augment_concurrency = raw
                .trim()
                .parse()
                .with_context(|| format!("AUGMENT_CONCURRENCY is not a number: {raw}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that base URLs parse and numeric settings are usable.
    ///
    /// # Errors
    ///
    /// Returns error naming the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        url::Url::parse(&self.search_api_url)
            .with_context(|| format!("invalid search API URL: {}", self.search_api_url))?;
        url::Url::parse(&self.llm_api_url)
            .with_context(|| format!("invalid LLM API URL: {}", self.llm_api_url))?;
        anyhow::ensure!(!self.llm_model.trim().is_empty(), "LLM model must not be empty");
        anyhow::ensure!(self.augment_concurrency > 0, "augment concurrency must be at least 1");
        Ok(())
    }

    /// Check if a Semantic Scholar API key is configured.
    #[must_use]
    pub const fn has_search_api_key(&self) -> bool {
        self.search_api_key.is_some()
    }

    /// Check if a completion API key is configured.
    #[must_use]
    pub const fn has_llm_api_key(&self) -> bool {
        self.llm_api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("has_search_api_key", &self.has_search_api_key())
            .field("search_api_url", &self.search_api_url)
            .field("has_llm_api_key", &self.has_llm_api_key())
            .field("llm_api_url", &self.llm_api_url)
            .field("llm_model", &self.llm_model)
            .field("augment_concurrency", &self.augment_concurrency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.has_search_api_key());
        assert!(!config.has_llm_api_key());
        assert_eq!(config.search_api_url, api::GRAPH_API);
        assert_eq!(config.augment_concurrency, 1);
    }

    #[test]
    fn test_config_for_testing_points_at_mock() {
        let config = Config::for_testing("http://127.0.0.1:9999");
        assert_eq!(config.search_api_url, "http://127.0.0.1:9999/graph/v1");
        assert_eq!(config.llm_api_url, "http://127.0.0.1:9999/v1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config { search_api_url: "not a url".to_string(), ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = Config { augment_concurrency: 0, ..Config::default() };
        assert!(config.validate().is_err());
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| (*v).to_string())
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.search_api_url, api::GRAPH_API);
        assert_eq!(config.llm_api_url, api::LLM_API);
        assert_eq!(config.llm_model, api::LLM_MODEL);
        assert_eq!(config.augment_concurrency, 1);
        assert!(!config.has_search_api_key());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars = [
            ("SEMANTIC_SCHOLAR_API_KEY", "s2-key"),
            ("OPENAI_API_KEY", "sk-test"),
            ("SEMANTIC_SCHOLAR_API_URL", "http://localhost:9000/graph/v1"),
            ("LLM_API_URL", "http://localhost:11434/v1"),
            ("LLM_MODEL", "llama3"),
            ("AUGMENT_CONCURRENCY", "4"),
        ];
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.search_api_key.as_deref(), Some("s2-key"));
        assert_eq!(config.llm_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.search_api_url, "http://localhost:9000/graph/v1");
        assert_eq!(config.llm_api_url, "http://localhost:11434/v1");
        assert_eq!(config.llm_model, "llama3");
        assert_eq!(config.augment_concurrency, 4);
    }

    #[test]
    fn test_from_lookup_blank_values_unset() {
        let vars = [
            ("SEMANTIC_SCHOLAR_API_KEY", "  "),
            ("LLM_API_URL", ""),
            ("LLM_MODEL", "   "),
            ("AUGMENT_CONCURRENCY", ""),
        ];
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert!(!config.has_search_api_key());
        assert_eq!(config.llm_api_url, api::LLM_API);
        assert_eq!(config.llm_model, api::LLM_MODEL);
        assert_eq!(config.augment_concurrency, 1);
    }

    #[test]
    fn test_from_lookup_rejects_non_numeric_concurrency() {
        let err = Config::from_lookup(lookup(&[("AUGMENT_CONCURRENCY", "abc")])).unwrap_err();
        assert!(err.to_string().contains("AUGMENT_CONCURRENCY"));
    }

    #[test]
    fn test_from_lookup_rejects_zero_concurrency() {
        let err = Config::from_lookup(lookup(&[("AUGMENT_CONCURRENCY", "0")])).unwrap_err();
        assert!(err.to_string().contains("concurrency"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_url() {
        assert!(Config::from_lookup(lookup(&[("LLM_API_URL", "not a url")])).is_err());
    }

    #[test]
    fn test_search_fields_cover_normalizer_inputs() {
        for field in ["paperId", "title", "abstract", "url", "authors", "citationCount"] {
            assert!(fields::SEARCH.contains(&field), "missing {field}");
        }
    }
}
