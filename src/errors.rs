use thiserror::Error;

#[derive(Error, Debug)]
pub enum RicordaError {
    #[error("Embedding request failed: {0}")]
    Embedding(String),

    #[error("Vector store write failed: {0}")]
    StoreWrite(String),

    #[error("Vector store query failed: {0}")]
    StoreQuery(String),

    #[error("Not configured: {0}")]
    Configuration(String),

    #[error("Caption generation failed: {0}")]
    Llm(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RicordaError>;
