use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    pub dimension: usize,
    pub model: String,
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum similarity score for a match to count as relevant
    #[serde(default = "default_score_min")]
    pub score_min: f32,
    /// Number of results shown to a user
    #[serde(default = "default_result_count")]
    pub result_count: usize,
}

fn default_score_min() -> f32 {
    crate::DEFAULT_SCORE_MIN
}

fn default_result_count() -> usize {
    crate::DEFAULT_RESULT_COUNT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            score_min: default_score_min(),
            result_count: default_result_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub enable_vector_indexes: bool,
    pub vector_index_lists: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub llm_endpoint: String,
    #[serde(default)]
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Default language phase for conversations without an explicit setting
    #[serde(default = "default_phase")]
    pub default_phase: String,
}

fn default_phase() -> String {
    "it".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_phase: default_phase(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    pub performance: PerformanceConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: AppConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// Load configuration from the default file paths
    ///
    /// `config.toml` wins; `config.example.toml` is accepted with a warning so
    /// a fresh checkout still runs.
    pub fn load() -> crate::Result<Self> {
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            eprintln!("warning: config.toml not found, using config.example.toml");
            Self::from_file("config.example.toml")
        } else {
            Err(crate::RicordaError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config.toml or config.example.toml in the working directory",
            )))
        }
    }

    /// Load configuration, falling back to built-in defaults when no file exists
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            // Logging is initialized after config, so this goes to stderr directly
            eprintln!("warning: falling back to default configuration: {e}");
            Self::default()
        })
    }

    /// Get store URL
    pub fn store_url(&self) -> &str {
        &self.store.url
    }

    /// Get max connections for the store pool
    pub fn max_connections(&self) -> u32 {
        self.store.max_connections
    }

    /// Get min connections for the store pool
    pub fn min_connections(&self) -> u32 {
        self.store.min_connections
    }

    /// Get connection timeout in seconds
    pub fn connection_timeout(&self) -> u64 {
        self.store.connection_timeout
    }

    /// Get embedding dimension
    pub fn embedding_dimension(&self) -> usize {
        self.embeddings.dimension
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.embeddings.model
    }

    /// Get embedding endpoint
    pub fn embedding_endpoint(&self) -> &str {
        &self.embeddings.endpoint
    }

    /// Get embedding API key
    pub fn embedding_api_key(&self) -> &str {
        &self.embeddings.api_key
    }

    /// Get minimum similarity score for search results
    pub fn score_min(&self) -> f32 {
        self.search.score_min
    }

    /// Get number of search results shown to a user
    pub fn result_count(&self) -> usize {
        self.search.result_count
    }

    /// Check if vector indexes are enabled
    pub fn vector_indexes_enabled(&self) -> bool {
        self.performance.enable_vector_indexes
    }

    /// Get vector index lists count
    pub fn vector_index_lists(&self) -> usize {
        self.performance.vector_index_lists
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.llm_endpoint
    }

    /// Get LLM key
    pub fn llm_key(&self) -> &str {
        &self.llm.llm_key
    }

    /// Get LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.llm_model
    }

    /// Get the default conversation phase
    pub fn default_phase(&self) -> &str {
        &self.session.default_phase
    }

    /// Check whether the vector store has connection details
    pub fn store_configured(&self) -> bool {
        !self.store.url.trim().is_empty()
    }

    /// Check whether the embedding service has an endpoint
    pub fn embeddings_configured(&self) -> bool {
        !self.embeddings.endpoint.trim().is_empty()
    }

    /// Check whether the caption drafter has an endpoint
    pub fn llm_configured(&self) -> bool {
        !self.llm.llm_endpoint.trim().is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                // Empty means unconfigured: commands that need the store
                // report that instead of attempting a connection
                url: String::new(),
                max_connections: 20,
                min_connections: 5,
                connection_timeout: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                backtrace: true,
            },
            embeddings: EmbeddingsConfig {
                dimension: 1536,
                model: "text-embedding-3-small".to_string(),
                endpoint: "https://api.openai.com/v1".to_string(),
                api_key: String::new(),
            },
            search: SearchConfig::default(),
            performance: PerformanceConfig {
                enable_vector_indexes: true,
                vector_index_lists: 100,
            },
            llm: LlmConfig {
                llm_endpoint: "https://api.openai.com/v1".to_string(),
                llm_key: String::new(),
                llm_model: "gpt-4o-mini".to_string(),
            },
            session: SessionConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_search_settings() {
        let config = AppConfig::default();
        assert!((config.score_min() - 0.60).abs() < f32::EPSILON);
        assert_eq!(config.result_count(), 3);
        assert_eq!(config.embedding_dimension(), 1536);
    }

    #[test]
    fn test_from_file_with_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[store]
url = "postgresql://localhost/ricorda"
max_connections = 10
min_connections = 2
connection_timeout = 15

[logging]
level = "debug"
backtrace = false

[embeddings]
dimension = 768
model = "nomic-embed-text"
endpoint = "http://localhost:11434"

[performance]
enable_vector_indexes = false
vector_index_lists = 50

[llm]
llm_endpoint = "http://localhost:11434"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.embedding_dimension(), 768);
        // Omitted sections take their defaults
        assert!((config.score_min() - 0.60).abs() < f32::EPSILON);
        assert_eq!(config.result_count(), 3);
        assert_eq!(config.default_phase(), "it");
        assert_eq!(config.llm_model(), "gpt-4o-mini");
        assert!(!config.vector_indexes_enabled());
    }

    #[test]
    fn test_configured_checks() {
        let mut config = AppConfig::default();
        // The built-in defaults carry no store connection details
        assert!(!config.store_configured());
        assert!(config.embeddings_configured());

        config.store.url = "postgresql://localhost/ricorda".to_string();
        config.embeddings.endpoint = "  ".to_string();
        assert!(config.store_configured());
        assert!(!config.embeddings_configured());
    }
}
