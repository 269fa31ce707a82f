//! LLM Module - question to candidate SQL

pub mod extractor;
pub mod ollama_client;
pub mod prompt;

use anyhow::Result;
use async_trait::async_trait;

pub use extractor::{extract_sql, extract_with_path, CandidateQuery, ExtractionPath};
pub use ollama_client::OllamaClient;
pub use prompt::PromptTemplate;

/// Text-completion backend.
///
/// Receives one fully rendered prompt and returns the raw completion. The
/// output is untrusted: it may hold prose, code fences or several statements.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Whether the backend can currently serve requests
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
