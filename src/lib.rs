pub mod cli;
pub mod config;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod rag;
pub mod session;
pub mod store;

/// Default number of results shown to a user per search
pub const DEFAULT_RESULT_COUNT: usize = 3;

/// Default minimum similarity score for a match to be shown without fallback
pub const DEFAULT_SCORE_MIN: f32 = 0.60;

pub use config::AppConfig;
pub use errors::*;
